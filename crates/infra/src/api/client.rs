//! Authenticated API client
//!
//! Every call carries the bearer token and tenant header. A 401 response
//! triggers exactly one silent token-refresh-and-retry; if the refresh
//! fails the error surfaces as an authentication failure, which is the one
//! condition that tears the session down.

use std::sync::Arc;
use std::time::Duration;

use horario_domain::Config;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the tenant API (e.g. "https://api.horario.app/v1")
    pub base_url: String,
    /// Tenant identifier sent on every request
    pub tenant_id: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.horario.app/v1".to_string(),
            tenant_id: "ueipab".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            tenant_id: config.tenant.tenant_id.clone(),
            timeout: Duration::from_secs(config.api.timeout_secs),
        }
    }
}

/// HTTP-based API client with authentication and tenant scoping.
pub struct ApiClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: ApiClientConfig,
}

impl ApiClient {
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HttpClient: {err}")))?;

        Ok(Self { http, auth, config })
    }

    pub fn tenant_id(&self) -> &str {
        &self.config.tenant_id
    }

    /// Execute a GET request and deserialize the JSON response.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_authorized(Method::GET, path, None).await?;
        let result = Self::parse_json(response, path).await?;
        info!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute a POST request and deserialize the JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Client(format!("failed to serialize body: {err}")))?;
        let response = self.send_authorized(Method::POST, path, Some(body)).await?;
        let result = Self::parse_json(response, path).await?;
        info!(path = %path, "POST request successful");
        Ok(result)
    }

    /// Execute a POST request and hand back the raw response. Used where
    /// the backend may answer with a file body instead of JSON.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Client(format!("failed to serialize body: {err}")))?;
        self.send_authorized(Method::POST, path, Some(body)).await
    }

    /// Execute a DELETE request and deserialize the JSON response.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_authorized(Method::DELETE, path, None).await?;
        let result = Self::parse_json(response, path).await?;
        info!(path = %path, "DELETE request successful");
        Ok(result)
    }

    /// Send one authorized request, refreshing the token once on 401.
    async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);

        for attempt in 0..2 {
            let token = self.auth.access_token().await?;

            let mut request = self
                .http
                .request(method.clone(), &url)
                .header("Authorization", format!("Bearer {token}"))
                .header("X-Tenant-ID", &self.config.tenant_id)
                .header("Content-Type", "application/json");
            if let Some(body) = &body {
                request = request.json(body);
            }

            debug!(%method, %url, attempt, "sending API request");
            let response =
                match tokio::time::timeout(self.config.timeout, self.http.send(request)).await {
                    Ok(Ok(response)) => response,
                    Ok(Err(err)) => return Err(ApiError::Network(err.to_string())),
                    Err(_) => return Err(ApiError::Timeout(self.config.timeout)),
                };

            if response.status() == StatusCode::UNAUTHORIZED && attempt == 0 {
                // Exactly one silent refresh-and-retry; a failed refresh
                // propagates as Auth and ends the session.
                warn!(%url, "401 received; attempting silent token refresh");
                self.auth.refresh().await?;
                continue;
            }

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Self::map_status_error(status, &url, body));
            }

            return Ok(response);
        }

        Err(ApiError::Auth(format!("{url} still unauthorized after token refresh")))
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            // These status codes have no body by RFC spec
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "no content response ({}) but {} expects a body",
                    status.as_u16(),
                    path
                ))
            });
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::Client(format!("failed to parse response: {err}")))
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Provider that swaps to a fresh token on refresh and counts attempts.
    struct RotatingProvider {
        tokens: Vec<&'static str>,
        cursor: AtomicUsize,
        refreshes: AtomicUsize,
        refresh_fails: bool,
    }

    impl RotatingProvider {
        fn new(tokens: Vec<&'static str>) -> Self {
            Self {
                tokens,
                cursor: AtomicUsize::new(0),
                refreshes: AtomicUsize::new(0),
                refresh_fails: false,
            }
        }
    }

    #[async_trait]
    impl AccessTokenProvider for RotatingProvider {
        async fn access_token(&self) -> Result<String, ApiError> {
            let index = self.cursor.load(Ordering::SeqCst).min(self.tokens.len() - 1);
            Ok(self.tokens[index].to_string())
        }

        async fn refresh(&self) -> Result<(), ApiError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.refresh_fails {
                return Err(ApiError::Auth("refresh rejected".to_string()));
            }
            self.cursor.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn client_for(server: &MockServer, provider: Arc<RotatingProvider>) -> ApiClient {
        let config = ApiClientConfig {
            base_url: server.uri(),
            tenant_id: "ueipab".to_string(),
            ..Default::default()
        };
        ApiClient::new(config, provider).unwrap()
    }

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        message: String,
    }

    #[tokio::test]
    async fn sends_bearer_and_tenant_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conflicts"))
            .and(header("Authorization", "Bearer token-a"))
            .and(header("X-Tenant-ID", "ueipab"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .mount(&server)
            .await;

        let provider = Arc::new(RotatingProvider::new(vec!["token-a"]));
        let client = client_for(&server, provider);

        let payload: Payload = client.get("/conflicts").await.unwrap();
        assert_eq!(payload.message, "ok");
    }

    #[tokio::test]
    async fn retries_once_with_refreshed_token_on_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/1"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dashboard/1"))
            .and(header("Authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "hola"})))
            .mount(&server)
            .await;

        let provider = Arc::new(RotatingProvider::new(vec!["stale", "fresh"]));
        let client = client_for(&server, Arc::clone(&provider));

        let payload: Payload = client.get("/dashboard/1").await.unwrap();
        assert_eq!(payload.message, "hola");
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_401_surfaces_auth_error_after_one_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = Arc::new(RotatingProvider::new(vec!["a", "b"]));
        let client = client_for(&server, Arc::clone(&provider));

        let err = client.get::<Payload>("/dashboard/1").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_propagates_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut provider = RotatingProvider::new(vec!["a"]);
        provider.refresh_fails = true;
        let provider = Arc::new(provider);
        let client = client_for(&server, Arc::clone(&provider));

        let err = client.get::<Payload>("/x").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn maps_server_and_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500).set_body_string("se rompió"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = Arc::new(RotatingProvider::new(vec!["t"]));
        let client = client_for(&server, provider);

        assert!(matches!(
            client.get::<Payload>("/boom").await.unwrap_err(),
            ApiError::Server(_)
        ));
        assert!(matches!(
            client.get::<Payload>("/missing").await.unwrap_err(),
            ApiError::Client(_)
        ));
    }

    #[tokio::test]
    async fn delete_with_no_content_deserializes_unit() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/assignments/9"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let provider = Arc::new(RotatingProvider::new(vec!["t"]));
        let client = client_for(&server, provider);

        let result: Result<(), ApiError> = client.delete("/assignments/9").await;
        assert!(result.is_ok());
    }
}
