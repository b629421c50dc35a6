//! Error types for Rookery
//!
//! All layers converge on this error type at the application boundary.
//! Layer-specific errors (e.g. `rookery-data::FetchError`) convert into it.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Rookery error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Remote data
    // ========================================================================
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error: status {0}")]
    Http(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    // ========================================================================
    // General
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // External conversions
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Misc
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the operation that produced this error is worth retrying.
    ///
    /// A retry here means a manual refresh (cache invalidation), never an
    /// automatic backoff loop.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Http(status) => *status >= 500,
            _ => false,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::Network("connection reset".to_string()).is_retryable());
        assert!(Error::Http(503).is_retryable());
        assert!(!Error::NotFound("magnuscarlsen".to_string()).is_retryable());
        assert!(!Error::Config("bad ttl".to_string()).is_retryable());
    }
}
