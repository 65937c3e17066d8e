//! Error types for specify-core

use thiserror::Error;

/// Result type alias using specify-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Specify
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value or format
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
