//! Core library for the `tennis` CLI.
//!
//! This crate defines:
//! - The hourly observation model and its validation
//! - Hard constraint filtering and per-objective scoring
//! - Pareto selection and day-by-day grouping of the results
//! - Configuration handling for the constraint thresholds
//!
//! It does no I/O besides the config file; forecasts are handed in by the caller.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod organize;
pub mod pareto;
pub mod pipeline;
pub mod score;

pub use config::Config;
pub use error::CoreError;
pub use filter::{ConstraintOverrides, Constraints};
pub use model::{
    DayGroup, HourlyObservation, Humidity, ObjectiveScores, RawField, RawObservation,
    ScoredObservation, TimeSlot,
};
pub use pareto::ParetoPartition;
pub use pipeline::{Recommendation, recommend, recommend_raw};
