use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// Display text for a humidity reading the feed could not provide.
pub const UNAVAILABLE: &str = "N/A";

/// Relative humidity, which some forecast feeds leave out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Humidity {
    Percent(f64),
    Unavailable,
}

impl Humidity {
    /// Numeric value used for filtering and scoring.
    ///
    /// A missing reading counts as 0%.
    pub fn effective_pct(&self) -> f64 {
        match self {
            Humidity::Percent(pct) => *pct,
            Humidity::Unavailable => 0.0,
        }
    }
}

impl Serialize for Humidity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Humidity::Percent(pct) => serializer.serialize_f64(*pct),
            Humidity::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

/// One forecast hour at the target location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyObservation {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_hh_mm")]
    pub time: NaiveTime,
    pub temperature_c: f64,
    pub wind_speed_kph: f64,
    pub wind_direction: String,
    pub precipitation_probability_pct: f64,
    pub humidity: Humidity,
    pub condition: String,
    pub location: String,
}

impl HourlyObservation {
    /// Reject records whose measurements cannot be scored.
    pub fn validate(&self) -> Result<()> {
        require_finite(RawObservation::TEMPERATURE, self.temperature_c)?;
        require_finite(RawObservation::WIND_SPEED, self.wind_speed_kph)?;
        if self.wind_speed_kph < 0.0 {
            return Err(CoreError::malformed(
                RawObservation::WIND_SPEED,
                self.wind_speed_kph.to_string(),
                "must not be negative",
            ));
        }
        require_percentage(
            RawObservation::PRECIPITATION,
            self.precipitation_probability_pct,
        )?;
        if let Humidity::Percent(pct) = self.humidity {
            require_percentage(RawObservation::HUMIDITY, pct)?;
        }
        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::malformed(field, value.to_string(), "must be a finite number"))
    }
}

fn require_percentage(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::malformed(field, value.to_string(), "must be between 0 and 100"))
    }
}

/// A cell of the tabular feed: numeric, still text, or something unusable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    /// Booleans, arrays and objects; rejected when the cell is read.
    Other(serde_json::Value),
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Number(n) => write!(f, "{n}"),
            RawField::Text(text) => f.write_str(text),
            RawField::Other(value) => write!(f, "{value}"),
        }
    }
}

impl RawField {
    fn to_number(&self, field: &'static str) -> Result<f64> {
        let value = match self {
            RawField::Number(n) => *n,
            RawField::Text(text) => match text.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => return Err(self.malformed(field, "not a number")),
            },
            RawField::Other(_) => return Err(self.malformed(field, "not a number or text")),
        };
        require_finite(field, value)?;
        Ok(value)
    }

    fn malformed(&self, field: &'static str, reason: &str) -> CoreError {
        CoreError::malformed(field, self.to_string(), reason)
    }
}

/// A row as produced by the ingestion side, column names included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    #[serde(rename = "Temperature (°C)", default)]
    pub temperature_c: Option<RawField>,
    #[serde(rename = "Wind Speed (kph)", default)]
    pub wind_speed_kph: Option<RawField>,
    #[serde(rename = "Wind Direction", default)]
    pub wind_direction: Option<String>,
    #[serde(rename = "Precipitation Probability (%)", default)]
    pub precipitation_probability_pct: Option<RawField>,
    #[serde(rename = "Humidity (%)", default)]
    pub humidity_pct: Option<RawField>,
    #[serde(rename = "Condition", default)]
    pub condition: Option<String>,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
}

impl RawObservation {
    pub const DATE: &'static str = "Date";
    pub const TIME: &'static str = "Time";
    pub const TEMPERATURE: &'static str = "Temperature (°C)";
    pub const WIND_SPEED: &'static str = "Wind Speed (kph)";
    pub const PRECIPITATION: &'static str = "Precipitation Probability (%)";
    pub const HUMIDITY: &'static str = "Humidity (%)";
}

impl TryFrom<RawObservation> for HourlyObservation {
    type Error = CoreError;

    fn try_from(raw: RawObservation) -> Result<Self> {
        let date = parse_date(required_text(RawObservation::DATE, &raw.date)?)?;
        let time = parse_time(required_text(RawObservation::TIME, &raw.time)?)?;

        let temperature_c = required_number(RawObservation::TEMPERATURE, &raw.temperature_c)?;
        let wind_speed_kph = required_number(RawObservation::WIND_SPEED, &raw.wind_speed_kph)?;
        let precipitation = required_number(
            RawObservation::PRECIPITATION,
            &raw.precipitation_probability_pct,
        )?;

        let humidity = match &raw.humidity_pct {
            None => Humidity::Unavailable,
            Some(RawField::Text(text)) if text.trim() == UNAVAILABLE => Humidity::Unavailable,
            Some(cell) => Humidity::Percent(cell.to_number(RawObservation::HUMIDITY)?),
        };

        let observation = HourlyObservation {
            date,
            time,
            temperature_c,
            wind_speed_kph,
            wind_direction: raw.wind_direction.unwrap_or_default(),
            precipitation_probability_pct: precipitation,
            humidity,
            condition: raw.condition.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
        };

        observation.validate()?;
        Ok(observation)
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => Err(CoreError::malformed(RawObservation::DATE, text, "expected YYYY-MM-DD")),
    }
}

fn parse_time(text: &str) -> Result<NaiveTime> {
    for format in ["%H:%M", "%H:%M:%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(text, format) {
            return Ok(time);
        }
    }
    Err(CoreError::malformed(RawObservation::TIME, text, "expected HH:MM"))
}

fn required_text<'a>(field: &'static str, cell: &'a Option<String>) -> Result<&'a str> {
    match cell.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CoreError::malformed(field, "", "missing")),
    }
}

fn required_number(field: &'static str, cell: &Option<RawField>) -> Result<f64> {
    match cell {
        Some(cell) => cell.to_number(field),
        None => Err(CoreError::malformed(field, "", "missing")),
    }
}

/// Desirability of one hour on each objective; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveScores {
    pub temperature: f64,
    pub wind: f64,
    pub precipitation: f64,
    pub humidity: f64,
}

impl ObjectiveScores {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.temperature,
            self.wind,
            self.precipitation,
            self.humidity,
        ]
    }

    /// Unweighted mean of the four objectives.
    pub fn overall(&self) -> f64 {
        self.as_array().iter().sum::<f64>() / 4.0
    }
}

/// A constraint-satisfying observation together with its scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredObservation {
    #[serde(flatten)]
    pub observation: HourlyObservation,
    pub scores: ObjectiveScores,
    pub overall_score: f64,
}

/// Presentation summary of one time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(serialize_with = "serialize_hh_mm")]
    pub time: NaiveTime,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub precipitation_probability: f64,
    pub humidity: Humidity,
    pub condition: String,
    pub overall_score: f64,
}

impl From<&ScoredObservation> for TimeSlot {
    fn from(scored: &ScoredObservation) -> Self {
        let obs = &scored.observation;
        Self {
            time: obs.time,
            temperature: obs.temperature_c,
            wind_speed: obs.wind_speed_kph,
            wind_direction: obs.wind_direction.clone(),
            precipitation_probability: obs.precipitation_probability_pct,
            humidity: obs.humidity,
            condition: obs.condition.clone(),
            overall_score: scored.overall_score,
        }
    }
}

/// All selected slots of a single calendar day, in time order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    pub best_times: Vec<TimeSlot>,
}

fn serialize_hh_mm<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format("%H:%M"))
}
