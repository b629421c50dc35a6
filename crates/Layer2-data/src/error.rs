//! Fetch error types
//!
//! `FetchError` covers everything that can go wrong between the browser and
//! the remote service. It is `Clone` because a coalesced fetch delivers the
//! same outcome to every waiting caller.

use rookery_foundation::Error as FoundationError;
use thiserror::Error;

/// Errors from remote fetches
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Record does not exist (HTTP 404 equivalent)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other non-2xx response
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Create from an HTTP status code
    pub fn from_http_status(status: u16, what: &str) -> Self {
        match status {
            404 => FetchError::NotFound(what.to_string()),
            _ => FetchError::Http { status },
        }
    }

    /// Whether a manual retry (refresh) is likely to help
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Http { status } => *status >= 500,
            FetchError::NotFound(_) | FetchError::Decode(_) => false,
        }
    }
}

// ============================================================================
// rookery_foundation::Error conversion
// ============================================================================

impl From<FetchError> for FoundationError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(msg) => FoundationError::Network(msg),
            FetchError::NotFound(what) => FoundationError::NotFound(what),
            FetchError::Http { status } => FoundationError::Http(status),
            FetchError::Decode(msg) => FoundationError::Decode(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert_eq!(
            FetchError::from_http_status(404, "hikaru"),
            FetchError::NotFound("hikaru".to_string())
        );
        assert_eq!(
            FetchError::from_http_status(503, "roster"),
            FetchError::Http { status: 503 }
        );
    }

    #[test]
    fn test_retryable() {
        assert!(FetchError::Network("reset".to_string()).is_retryable());
        assert!(FetchError::Http { status: 500 }.is_retryable());
        assert!(!FetchError::Http { status: 400 }.is_retryable());
        assert!(!FetchError::NotFound("x".to_string()).is_retryable());
    }
}
