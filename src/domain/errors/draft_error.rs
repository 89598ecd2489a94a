//! Form draft error types.

use thiserror::Error;

/// Draft could not be turned into an aircraft.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DraftError {
    #[error("{field} must be a non-negative number, got {value:?}")]
    InvalidNumber { field: String, value: String },
}

impl DraftError {
    /// Creates invalid number error.
    #[must_use]
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}
