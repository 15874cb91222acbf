//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit status.

use std::io;

use thiserror::Error;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Startup failed: {0}")]
    Startup(String),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "MYDB_CLI_CONFIG_ERROR",
            CliError::Io(_) => "MYDB_CLI_IO_ERROR",
            CliError::Startup(_) => "MYDB_CLI_STARTUP_FAILED",
        }
    }
}
