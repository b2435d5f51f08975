//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::{ApplicationError, ErrorKind};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Application(e) => match e {
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                ApplicationError::External { .. } => crate::exitcode::SOFTWARE,
                _ => match e.kind() {
                    ErrorKind::InvalidInput => crate::exitcode::USAGE,
                    ErrorKind::MissingData => crate::exitcode::DATAERR,
                    ErrorKind::Configuration => crate::exitcode::CONFIG,
                    ErrorKind::Environment => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}
