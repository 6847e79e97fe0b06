//! Hard pass/fail gate applied before any scoring.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{CoreError, Result},
    model::HourlyObservation,
};

/// Thresholds an hour must beat to be playable at all.
///
/// Every comparison is strict: a temperature equal to the minimum, or a wind
/// speed equal to the maximum, fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    #[serde(rename = "minTemperature", alias = "min_temperature_c")]
    pub min_temperature_c: f64,
    #[serde(rename = "maxWindSpeed", alias = "max_wind_speed_kph")]
    pub max_wind_speed_kph: f64,
    #[serde(rename = "maxPrecipitationProbability", alias = "max_precipitation_probability_pct")]
    pub max_precipitation_probability_pct: f64,
    #[serde(rename = "maxHumidity", alias = "max_humidity_pct")]
    pub max_humidity_pct: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_temperature_c: 4.0,
            max_wind_speed_kph: 20.0,
            max_precipitation_probability_pct: 45.0,
            max_humidity_pct: 95.0,
        }
    }
}

/// Per-call replacements for individual bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstraintOverrides {
    pub min_temperature_c: Option<f64>,
    pub max_wind_speed_kph: Option<f64>,
    pub max_precipitation_probability_pct: Option<f64>,
    pub max_humidity_pct: Option<f64>,
}

impl Constraints {
    /// Check that every bound is usable.
    ///
    /// Wind and precipitation maxima also divide the scores, so they must be
    /// strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named_bounds() {
            if !value.is_finite() {
                return Err(CoreError::invalid_constraint(name, value, "must be a finite number"));
            }
        }
        if self.max_wind_speed_kph <= 0.0 {
            return Err(CoreError::invalid_constraint(
                "maxWindSpeed",
                self.max_wind_speed_kph,
                "must be greater than zero",
            ));
        }
        if self.max_precipitation_probability_pct <= 0.0 {
            return Err(CoreError::invalid_constraint(
                "maxPrecipitationProbability",
                self.max_precipitation_probability_pct,
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn named_bounds(&self) -> [(&'static str, f64); 4] {
        [
            ("minTemperature", self.min_temperature_c),
            ("maxWindSpeed", self.max_wind_speed_kph),
            ("maxPrecipitationProbability", self.max_precipitation_probability_pct),
            ("maxHumidity", self.max_humidity_pct),
        ]
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ConstraintOverrides) -> Self {
        if let Some(v) = overrides.min_temperature_c {
            self.min_temperature_c = v;
        }
        if let Some(v) = overrides.max_wind_speed_kph {
            self.max_wind_speed_kph = v;
        }
        if let Some(v) = overrides.max_precipitation_probability_pct {
            self.max_precipitation_probability_pct = v;
        }
        if let Some(v) = overrides.max_humidity_pct {
            self.max_humidity_pct = v;
        }
        self
    }

    /// Name of the first bound the observation violates, if any.
    ///
    /// A NaN on either side of a comparison counts as a violation.
    pub fn violation(&self, obs: &HourlyObservation) -> Option<&'static str> {
        let precipitation = obs.precipitation_probability_pct;
        let checks = [
            ("minTemperature", obs.temperature_c > self.min_temperature_c),
            ("maxWindSpeed", obs.wind_speed_kph < self.max_wind_speed_kph),
            (
                "maxPrecipitationProbability",
                precipitation < self.max_precipitation_probability_pct,
            ),
            ("maxHumidity", obs.humidity.effective_pct() < self.max_humidity_pct),
        ];
        checks
            .into_iter()
            .find(|&(_, passes)| !passes)
            .map(|(name, _)| name)
    }

    pub fn admits(&self, obs: &HourlyObservation) -> bool {
        self.violation(obs).is_none()
    }
}

/// Keep the observations that satisfy every constraint, in input order.
pub fn filter<'a>(
    observations: &'a [HourlyObservation],
    constraints: &Constraints,
) -> Vec<&'a HourlyObservation> {
    observations
        .iter()
        .filter(|obs| match constraints.violation(obs) {
            None => true,
            Some(bound) => {
                trace!(date = %obs.date, time = %obs.time, bound, "Time slot rejected");
                false
            }
        })
        .collect()
}
