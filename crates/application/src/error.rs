//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The provider answered but had nothing for this request
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::RateLimited | ApplicationError::ExternalService(_)
        )
    }
}

impl From<domain::InvalidCoordinates> for ApplicationError {
    fn from(err: domain::InvalidCoordinates) -> Self {
        Self::Domain(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ExternalService("timeout".into()).is_retryable());
        assert!(!ApplicationError::NotFound("no route".into()).is_retryable());
        assert!(!ApplicationError::Internal("bug".into()).is_retryable());
    }

    #[test]
    fn test_invalid_coordinates_convert_to_domain_error() {
        let err: ApplicationError = domain::InvalidCoordinates.into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApplicationError::ExternalService("HTTP 502".into()).to_string(),
            "External service error: HTTP 502"
        );
        assert_eq!(ApplicationError::RateLimited.to_string(), "Rate limit exceeded");
    }
}
