//! CLI error types.

use thiserror::Error;
use vectorinterp_core::InterpolationError;

use crate::config::ConfigError;

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Interpolator construction or query failed
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input or output failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
