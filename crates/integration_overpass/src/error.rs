//! Overpass error types

use thiserror::Error;

/// Errors that can occur while querying the Overpass API
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Connection to the interpreter failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Interpreter answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the interpreter response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Too many requests (the public instance allows only a few slots)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Coordinates cannot be placed in a query
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OverpassError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(OverpassError::Timeout { timeout_secs: 20 }.is_retryable());
        assert!(OverpassError::RequestFailed("HTTP 504".into()).is_retryable());
        assert!(!OverpassError::ParseError("eof".into()).is_retryable());
        assert!(!OverpassError::InvalidLocation("NaN".into()).is_retryable());
    }
}
