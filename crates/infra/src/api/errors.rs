//! API-specific error types
//!
//! Provides error classification for API operations with retry metadata and
//! the mapping into the domain taxonomy.

use std::time::Duration;

use horario_domain::HorarioError;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401 after the refresh attempt) - forces logout
    Authentication,
    /// Server errors (5xx) - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Configuration errors - non-retryable
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) | Self::Cancelled => ApiErrorCategory::Config,
        }
    }

    /// Check if this error should be retried
    pub fn should_retry(&self) -> bool {
        matches!(self.category(), ApiErrorCategory::Server | ApiErrorCategory::Network)
    }
}

/// Map API failures into the domain taxonomy. A 401 surviving the silent
/// refresh attempt becomes [`HorarioError::AuthExpired`], which is the one
/// failure that forces logout.
impl From<ApiError> for HorarioError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::AuthExpired(message),
            ApiError::Server(message) | ApiError::Client(message) => {
                Self::ServerRejection(message)
            }
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(duration) => {
                Self::Network(format!("request timed out after {duration:?}"))
            }
            ApiError::Config(message) => Self::Config(message),
            ApiError::Cancelled => Self::Internal("operation cancelled".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(ApiError::Auth("x".into()).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::Server("x".into()).category(), ApiErrorCategory::Server);
        assert_eq!(ApiError::Network("x".into()).category(), ApiErrorCategory::Network);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(1)).category(),
            ApiErrorCategory::Network
        );
    }

    #[test]
    fn retry_only_transient_failures() {
        assert!(ApiError::Server("x".into()).should_retry());
        assert!(ApiError::Network("x".into()).should_retry());
        assert!(!ApiError::Auth("x".into()).should_retry());
        assert!(!ApiError::Client("x".into()).should_retry());
    }

    #[test]
    fn auth_maps_to_forced_logout() {
        let domain: HorarioError = ApiError::Auth("refresh failed".into()).into();
        assert!(domain.forces_logout());

        let domain: HorarioError = ApiError::Server("boom".into()).into();
        assert!(!domain.forces_logout());
    }
}
