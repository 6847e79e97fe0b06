//! Piecewise-linear desirability curves, one per objective.
//!
//! Curves are unclamped. Hours outside the expected operating range score
//! below 0 or above 1, and dominance is computed on those raw values.

use crate::{
    filter::Constraints,
    model::{HourlyObservation, ObjectiveScores, ScoredObservation},
};

const TEMPERATURE_RAMP_UP_C: f64 = 20.0;
const TEMPERATURE_ZERO_C: f64 = 30.0;
const TEMPERATURE_FALLOFF_C: f64 = 5.0;

const HUMIDITY_COMFORT_LOW_PCT: f64 = 40.0;
const HUMIDITY_COMFORT_HIGH_PCT: f64 = 60.0;

/// Rises linearly to 1.0 just below 20°C, then falls by 1 per 5°C, reaching 0 at 30°C.
///
/// The two branches do not meet: 20°C scores 2.0 and 25°C scores 1.0.
pub fn temperature_score(temperature_c: f64) -> f64 {
    if temperature_c < TEMPERATURE_RAMP_UP_C {
        temperature_c / TEMPERATURE_RAMP_UP_C
    } else {
        (TEMPERATURE_ZERO_C - temperature_c) / TEMPERATURE_FALLOFF_C
    }
}

/// 1.0 in still air, 0.0 at the wind constraint.
pub fn wind_score(wind_speed_kph: f64, max_wind_speed_kph: f64) -> f64 {
    1.0 - wind_speed_kph / max_wind_speed_kph
}

/// 1.0 when rain is impossible, 0.0 at the precipitation constraint.
pub fn precipitation_score(probability_pct: f64, max_probability_pct: f64) -> f64 {
    1.0 - probability_pct / max_probability_pct
}

/// Flat 1.0 across 40-60%, linear ramps outside.
pub fn humidity_score(humidity_pct: f64) -> f64 {
    if humidity_pct < HUMIDITY_COMFORT_LOW_PCT {
        humidity_pct / HUMIDITY_COMFORT_LOW_PCT
    } else if humidity_pct > HUMIDITY_COMFORT_HIGH_PCT {
        (100.0 - humidity_pct) / HUMIDITY_COMFORT_LOW_PCT
    } else {
        1.0
    }
}

pub fn objective_scores(obs: &HourlyObservation, constraints: &Constraints) -> ObjectiveScores {
    ObjectiveScores {
        temperature: temperature_score(obs.temperature_c),
        wind: wind_score(obs.wind_speed_kph, constraints.max_wind_speed_kph),
        precipitation: precipitation_score(
            obs.precipitation_probability_pct,
            constraints.max_precipitation_probability_pct,
        ),
        humidity: humidity_score(obs.humidity.effective_pct()),
    }
}

pub fn score(obs: &HourlyObservation, constraints: &Constraints) -> ScoredObservation {
    let scores = objective_scores(obs, constraints);
    ScoredObservation {
        observation: obs.clone(),
        overall_score: scores.overall(),
        scores,
    }
}

pub fn score_all(
    observations: &[&HourlyObservation],
    constraints: &Constraints,
) -> Vec<ScoredObservation> {
    observations
        .iter()
        .map(|obs| score(obs, constraints))
        .collect()
}
