//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Message shown for any time-of-day input that cannot be normalized.
pub const TIME_FORMAT_MESSAGE: &str = "Start/stop times must be a time format: HH:MM";

/// Message shown for any date input that cannot be normalized.
pub const DATE_FORMAT_MESSAGE: &str = "Date must be a valid format, eg. YYYY-MM-DD";

/// Domain errors represent malformed user input caught by the pure parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{message}")]
    Format { input: String, message: String },
}

impl DomainError {
    pub fn time_format(input: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            message: TIME_FORMAT_MESSAGE.to_string(),
        }
    }

    pub fn date_format(input: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            message: DATE_FORMAT_MESSAGE.to_string(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
