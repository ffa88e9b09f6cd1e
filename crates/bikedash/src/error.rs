//! Application-wide error types using thiserror.

use bikedash_common::DashError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error raised by the loading, aggregation or rendering layers.
    #[error(transparent)]
    Dashboard(#[from] DashError),

    /// A configuration file given on the command line does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
