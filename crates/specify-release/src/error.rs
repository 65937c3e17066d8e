//! Error types for specify-release

use thiserror::Error;

/// Result type alias using specify-release's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Release download error types
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("{url} returned HTTP {status}{detail}")]
    Http {
        status: u16,
        url: String,
        detail: String,
    },

    /// Token cannot be sent as a header value
    #[error("GitHub token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// Repository has no usable release
    #[error("No release found for {repo}")]
    ReleaseNotFound { repo: String },

    /// Archive could not be extracted
    #[error("Archive extraction failed: {message}")]
    Archive { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] specify_core::Error),
}

impl Error {
    /// Create an HTTP status error; `detail` is appended verbatim when non-empty
    pub fn http(status: u16, url: impl Into<String>, detail: Option<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
            detail: detail
                .filter(|d| !d.trim().is_empty())
                .map(|d| format!("\n{}", d.trim()))
                .unwrap_or_default(),
        }
    }

    /// Create a release not found error
    pub fn release_not_found(repo: impl Into<String>) -> Self {
        Self::ReleaseNotFound { repo: repo.into() }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }
}
