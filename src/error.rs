//! Error handling for the simulators
//!
//! The simulation core has exactly one failure mode, a rejected target. The
//! remaining variants belong to the configuration loader, the credential
//! prober and the command line front-end.

use thiserror::Error;

/// Main error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type alias for simulation operations
pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// True when the error was caused by the caller-supplied target string
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, SimError::InvalidTarget(_))
    }
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::ConfigError(format!("Failed to parse TOML: {}", e))
    }
}

impl From<std::num::ParseIntError> for SimError {
    fn from(e: std::num::ParseIntError) -> Self {
        SimError::ParseError(e.to_string())
    }
}
