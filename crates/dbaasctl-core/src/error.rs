//! Unified error handling for dbaasctl-core
//!
//! One error type covers the API client, the state poller, and the
//! configuration subsystem, with helper methods for classifying failures.
//!
//! # Example
//!
//! ```rust
//! use dbaasctl_core::{CoreError, Result};
//!
//! fn handle_error(err: CoreError) {
//!     if err.is_not_found() {
//!         println!("Resource not found");
//!     } else if err.is_timeout() {
//!         println!("Gave up waiting");
//!     }
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Core error type for API and polling operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// The requested resource does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication or authorization failure (HTTP 401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Any other non-success response from the API
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be decoded
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Polling gave up before the resource reached a target status
    #[error("Timed out after {timeout:?} waiting for resource {id}")]
    PollTimeout { id: String, timeout: Duration },

    /// The remote reported a status that is neither pending nor target
    #[error("Resource {id} entered unexpected status {status:?}")]
    UnexpectedStatus { id: String, status: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::AuthenticationFailed(_))
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoreError::Api { status, .. } if *status >= 500)
    }

    /// Returns true if this is a timeout error
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::PollTimeout { .. })
    }

    /// Returns true if this error is potentially retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Connection(_) => true,
            CoreError::PollTimeout { .. } => true,
            CoreError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            // Body arrived but did not match the expected shape
            CoreError::Api {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: format!("invalid response body: {}", err),
            }
        } else {
            CoreError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = CoreError::NotFound("/cloud/project/p/database/redis/abc".into());
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_server_error_is_retryable() {
        let err = CoreError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert!(err.is_server_error());
        assert!(err.is_retryable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_rate_limit_is_retryable_but_not_server_error() {
        let err = CoreError::Api {
            status: 429,
            message: "Too Many Requests".into(),
        };
        assert!(err.is_retryable());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_poll_timeout() {
        let err = CoreError::PollTimeout {
            id: "abc".into(),
            timeout: Duration::from_secs(1200),
        };
        assert!(err.is_timeout());
        assert!(err.is_retryable());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = CoreError::UnexpectedStatus {
            id: "abc".into(),
            status: "ERROR".into(),
        };
        assert!(err.to_string().contains("ERROR"));
        assert!(!err.is_retryable());
    }
}
