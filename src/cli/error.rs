//! CLI-level errors (wraps library errors)

use std::io::ErrorKind;

use thiserror::Error;

use crate::config::SettingsError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Config(#[from] SettingsError),

    #[error("file selection failed: {0}")]
    Selection(String),

    #[error("no input: {0}")]
    NoInput(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::NoInput(_) => crate::exitcode::NOINPUT,
            CliError::Selection(_) => crate::exitcode::SOFTWARE,
            CliError::Tree(e) => match e {
                TreeError::MalformedLine { .. } | TreeError::ParentNotFound { .. } => {
                    crate::exitcode::DATAERR
                }
                TreeError::NodeNotFound { .. } => crate::exitcode::NOUSER,
                TreeError::Io { source, .. } if source.kind() == ErrorKind::NotFound => {
                    crate::exitcode::NOINPUT
                }
                TreeError::Io { .. } => crate::exitcode::IOERR,
                TreeError::InternalError(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
