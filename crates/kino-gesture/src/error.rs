//! Error types for Kino Gesture

use thiserror::Error;

/// Result type alias for gesture engine setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Gesture engine error types
///
/// The engine never fails while handling input; these errors only surface when
/// tunables are loaded or validated, or when talking to a stopped driver.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Driver errors
    #[error("Gesture driver has shut down")]
    DriverClosed,
}

impl Error {
    /// Create a configuration error
    pub fn invalid_config(field: &'static str, value: f64, reason: &'static str) -> Self {
        Error::InvalidConfig { field, value, reason }
    }

    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidConfig { .. } => "INVALID_CONFIG",
            Error::Json(_) => "CONFIG_PARSE",
            Error::Io(_) => "IO",
            Error::DriverClosed => "DRIVER_CLOSED",
        }
    }
}
