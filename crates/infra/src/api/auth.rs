//! Session authentication with silent token refresh
//!
//! The auth collaborator issues the credentials; this service only holds
//! the bearer token pair for the session, performs the single silent
//! refresh the contract allows, and tears the session down when the
//! refresh fails.

use async_trait::async_trait;
use horario_domain::types::session::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SessionTokens, UserProfile,
};
use reqwest::Method;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Trait for providing access tokens.
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get the current access token.
    async fn access_token(&self) -> Result<String, ApiError>;

    /// Perform one silent refresh attempt. A failure must leave the session
    /// torn down so the caller can force the unauthenticated view.
    async fn refresh(&self) -> Result<(), ApiError>;
}

/// Holds the bearer token pair and drives the refresh handshake.
pub struct SessionAuthService {
    http: HttpClient,
    base_url: String,
    tokens: RwLock<Option<SessionTokens>>,
}

impl SessionAuthService {
    /// `base_url` is the tenant API root, e.g. `https://api.example/v1`.
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), tokens: RwLock::new(None) }
    }

    /// Authenticate against the backend and install the returned tokens.
    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .http
            .send(self.http.request(Method::POST, &url).json(request))
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!("login rejected ({status}): {body}")));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|err| ApiError::Client(format!("malformed login response: {err}")))?;

        match (body.success, body.access_token, body.refresh_token, body.user) {
            (true, Some(access_token), Some(refresh_token), Some(user)) => {
                *self.tokens.write().await = Some(SessionTokens { access_token, refresh_token });
                info!(user_id = user.id, "session established");
                Ok(user)
            }
            _ => Err(ApiError::Auth(
                body.message.unwrap_or_else(|| "credenciales inválidas".to_string()),
            )),
        }
    }

    /// Install an externally issued token pair (e.g. restored session).
    pub async fn install_tokens(&self, tokens: SessionTokens) {
        *self.tokens.write().await = Some(tokens);
    }

    /// Drop the session tokens.
    pub async fn logout(&self) {
        *self.tokens.write().await = None;
        info!("session cleared");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }
}

#[async_trait]
impl AccessTokenProvider for SessionAuthService {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or_else(|| ApiError::Auth("no hay sesión activa".to_string()))
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        let refresh_token = self
            .tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.refresh_token.clone())
            .ok_or_else(|| ApiError::Auth("no hay sesión que refrescar".to_string()))?;

        debug!("attempting silent token refresh");
        let url = format!("{}/auth/refresh", self.base_url);
        let request = RefreshRequest { refresh_token };

        let outcome = async {
            let response = self
                .http
                .send(self.http.request(Method::POST, &url).json(&request))
                .await
                .map_err(|err| ApiError::Network(err.to_string()))?;

            if !response.status().is_success() {
                return Err(ApiError::Auth(format!(
                    "token refresh rejected ({})",
                    response.status()
                )));
            }

            response
                .json::<RefreshResponse>()
                .await
                .map_err(|err| ApiError::Client(format!("malformed refresh response: {err}")))
        }
        .await;

        match outcome {
            Ok(body) => {
                *self.tokens.write().await = Some(SessionTokens {
                    access_token: body.access_token,
                    refresh_token: body.refresh_token,
                });
                debug!("token refresh succeeded");
                Ok(())
            }
            Err(err) => {
                // A failed refresh ends the session; the caller is forced
                // back to the unauthenticated view.
                warn!(error = %err, "token refresh failed; tearing down session");
                *self.tokens.write().await = None;
                Err(ApiError::Auth(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn tokens(access: &str, refresh: &str) -> SessionTokens {
        SessionTokens { access_token: access.to_string(), refresh_token: refresh.to_string() }
    }

    async fn service(server: &MockServer) -> SessionAuthService {
        SessionAuthService::new(HttpClient::new().unwrap(), server.uri())
    }

    #[tokio::test]
    async fn login_installs_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "access_token": "acc-1",
                "refresh_token": "ref-1",
                "user": { "id": 5, "first_name": "María", "role": "teacher" }
            })))
            .mount(&server)
            .await;

        let auth = service(&server).await;
        let user = auth
            .login(&LoginRequest {
                email: "docente@ueipab.edu.ve".into(),
                password: "secreto".into(),
                tenant_id: Some("ueipab".into()),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 5);
        assert!(auth.is_authenticated().await);
        assert_eq!(auth.access_token().await.unwrap(), "acc-1");
    }

    #[tokio::test]
    async fn login_failure_reports_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Error de autenticación"
            })))
            .mount(&server)
            .await;

        let auth = service(&server).await;
        let err = auth
            .login(&LoginRequest {
                email: "x@y".into(),
                password: "mal".into(),
                tenant_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert!(!auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn refresh_swaps_both_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(body_json_string(r#"{"refresh_token":"ref-old"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "acc-new",
                "refresh_token": "ref-new"
            })))
            .mount(&server)
            .await;

        let auth = service(&server).await;
        auth.install_tokens(tokens("acc-old", "ref-old")).await;

        auth.refresh().await.unwrap();
        assert_eq!(auth.access_token().await.unwrap(), "acc-new");
    }

    #[tokio::test]
    async fn failed_refresh_tears_down_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let auth = service(&server).await;
        auth.install_tokens(tokens("acc", "ref")).await;

        let err = auth.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert!(!auth.is_authenticated().await);
        assert!(auth.access_token().await.is_err());
    }

    #[tokio::test]
    async fn refresh_without_session_fails() {
        let server = MockServer::start().await;
        let auth = service(&server).await;
        assert!(matches!(auth.refresh().await.unwrap_err(), ApiError::Auth(_)));
    }
}
