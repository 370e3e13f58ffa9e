//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Horario
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum HorarioError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired: {0}")]
    AuthExpired(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server rejected request: {0}")]
    ServerRejection(String),

    #[error("Optimization failed: {0}")]
    OptimizationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HorarioError {
    /// Stable label suitable for metrics and structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::AuthExpired(_) => "auth_expired",
            Self::Validation(_) => "validation",
            Self::ServerRejection(_) => "server_rejection",
            Self::OptimizationFailed(_) => "optimization_failed",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether this failure must tear down the session and force the
    /// unauthenticated view. Only auth expiry does.
    pub fn forces_logout(&self) -> bool {
        matches!(self, Self::AuthExpired(_))
    }
}

/// Result type alias for Horario operations
pub type Result<T> = std::result::Result<T, HorarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_expiry_forces_logout() {
        assert!(HorarioError::AuthExpired("refresh failed".into()).forces_logout());
        assert!(!HorarioError::Network("timeout".into()).forces_logout());
        assert!(!HorarioError::ServerRejection("409".into()).forces_logout());
    }

    #[test]
    fn errors_serialize_tagged() {
        let err = HorarioError::Validation("missing format".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Validation");
        assert_eq!(json["message"], "missing format");
    }
}
