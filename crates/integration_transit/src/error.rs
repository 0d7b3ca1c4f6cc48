//! Transit planner error types

use thiserror::Error;

/// Errors returned by the Transitous planner
#[derive(Debug, Error)]
pub enum TransitError {
    /// The planner could not be reached
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No answer within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// Configured timeout in seconds
        timeout_secs: u64,
    },

    /// HTTP 429 from the planner
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Value of the `Retry-After` header, if any
        retry_after_secs: Option<u64>,
    },

    /// The planner answered with a server error (5xx)
    #[error("Planner unavailable (HTTP {status})")]
    ServiceUnavailable {
        /// HTTP status code
        status: u16,
    },

    /// The planner refused the request (4xx other than 429)
    #[error("Planner rejected request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Start of the response body
        message: String,
    },

    /// The body was not a plan response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Coordinates that cannot be sent to the planner
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

impl TransitError {
    /// Whether the same request may succeed later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
                | Self::ServiceUnavailable { .. }
        )
    }
}
