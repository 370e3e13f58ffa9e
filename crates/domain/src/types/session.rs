//! User session and authentication exchange types
//!
//! Credential issuance lives with the auth collaborator; these types only
//! cover what the client holds and the refresh handshake it performs.

use serde::{Deserialize, Serialize};

/// User roles recognized by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Teacher,
    SchoolAdmin,
    AcademicCoordinator,
    PlatformAdmin,
}

impl UserRole {
    /// Administrator roles see the platform dashboard instead of the
    /// per-teacher one.
    pub fn is_admin(self) -> bool {
        !matches!(self, Self::Teacher)
    }
}

/// The authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub display_role: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Bearer token pair held for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token refresh response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_roles() {
        assert!(!UserRole::Teacher.is_admin());
        assert!(UserRole::SchoolAdmin.is_admin());
        assert!(UserRole::AcademicCoordinator.is_admin());
        assert!(UserRole::PlatformAdmin.is_admin());
    }

    #[test]
    fn role_uses_snake_case_keys() {
        let role: UserRole = serde_json::from_str("\"academic_coordinator\"").unwrap();
        assert_eq!(role, UserRole::AcademicCoordinator);
    }

    #[test]
    fn login_request_omits_absent_tenant() {
        let request = LoginRequest {
            email: "docente@ueipab.edu.ve".into(),
            password: "secreto".into(),
            tenant_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tenant_id").is_none());
    }
}
