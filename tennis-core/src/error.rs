//! Error types for the tennis-time core.

use thiserror::Error;

/// Errors raised while validating input to the recommendation pipeline.
///
/// Configuration problems and data problems are kept apart so callers can
/// tell a bad config file from a bad forecast feed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A constraint bound is unusable (non-finite, or a non-positive divisor).
    #[error("Invalid constraint '{name}': {value} ({reason})")]
    InvalidConstraint {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// An hourly record has a missing or non-numeric required field.
    #[error("Malformed record{}: field '{field}' is '{value}' ({reason})", at_record(.index))]
    MalformedObservation {
        index: Option<usize>,
        field: &'static str,
        value: String,
        reason: String,
    },
}

fn at_record(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at record {i}"),
        None => String::new(),
    }
}

impl CoreError {
    pub fn invalid_constraint(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConstraint {
            name,
            value,
            reason,
        }
    }

    pub fn malformed<V, R>(field: &'static str, value: V, reason: R) -> Self
    where
        V: Into<String>,
        R: Into<String>,
    {
        Self::MalformedObservation {
            index: None,
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Attach the position of the offending record in the input sequence.
    #[must_use]
    pub fn at_index(mut self, position: usize) -> Self {
        if let Self::MalformedObservation { index, .. } = &mut self {
            *index = Some(position);
        }
        self
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConstraint { .. })
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::MalformedObservation { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
