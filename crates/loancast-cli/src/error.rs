//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use loancast_loans::LoanError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid month list.
    #[error("Invalid month list: {0}. Use comma-separated month numbers, e.g. 12,24,36.")]
    InvalidMonths(String),

    /// Invalid target month.
    #[error("Invalid target month: {0}. Must be a finite number.")]
    InvalidTarget(f64),

    /// Configuration file could not be parsed.
    #[error("Configuration error in {path}: {message}")]
    Config {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Refused to overwrite an existing configuration file.
    #[error("Configuration file already exists: {0}. Use --force to overwrite.")]
    ConfigExists(PathBuf),

    /// No configuration directory on this platform.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Loan or forecast error.
    #[error(transparent)]
    Loan(#[from] LoanError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
