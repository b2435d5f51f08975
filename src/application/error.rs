//! Application-level errors (wraps domain errors)

use itertools::Itertools;
use thiserror::Error;

use crate::domain::DomainError;

/// Coarse error classification so callers can branch without matching text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Setup mistakes: fatal, raised before any command logic runs
    Configuration,
    /// Bad user input: unknown command or verb, malformed time/date
    InvalidInput,
    /// A required data key was demanded but never supplied
    MissingData,
    /// The environment failed us: I/O or an external program
    Environment,
}

/// Application errors wrap domain errors and add engine-level failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{message}")]
    Configuration { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{verb}: invalid sub-command, Valid subcommands: {}", .valid.iter().join(", "))]
    InvalidSubcommand { verb: String, valid: Vec<String> },

    #[error("Error: subcommand {verb} is already registered")]
    DuplicateSubcommand { verb: String },

    #[error("Command expecting data at index \"{key}\"")]
    MissingData { key: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{command} failed: {message}")]
    External { command: String, message: String },

    /// The working repository is not in a state the command can use
    #[error("{message}")]
    Repository { message: String },
}

impl ApplicationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// `Invalid command "<name>"`
    pub fn invalid_command(name: &str) -> Self {
        Self::invalid_input(format!("Invalid command \"{}\"", name))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Configuration { .. }
            | ApplicationError::DuplicateSubcommand { .. }
            | ApplicationError::Config { .. } => ErrorKind::Configuration,
            ApplicationError::Domain(_)
            | ApplicationError::InvalidInput { .. }
            | ApplicationError::InvalidSubcommand { .. } => ErrorKind::InvalidInput,
            ApplicationError::MissingData { .. } => ErrorKind::MissingData,
            ApplicationError::OperationFailed { .. }
            | ApplicationError::External { .. }
            | ApplicationError::Repository { .. } => ErrorKind::Environment,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
