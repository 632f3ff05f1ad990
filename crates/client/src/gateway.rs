//! Remote API gateway.
//!
//! Every REST call goes through [`ApiGateway`], which:
//!
//! - attaches `Authorization: Bearer <token>` when a token exists and never
//!   when absent (public reads like the menu stay anonymous),
//! - bounds the request with the configured timeout,
//! - normalizes the backend's `{success, data, message}` envelope and the
//!   HTTP status into a single tagged [`ApiResult`], classified once.
//!
//! The gateway never throws through the boundary and never retries; retry
//! policy belongs to callers, and no caller in this system retries.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};
use url::Url;

use crate::auth::{AuthClassification, AuthSession};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::storage::KvStore;

/// Outcome of a remote call, classified at the boundary.
///
/// This is the one discriminated shape the rest of the SDK consumes; no
/// caller ever inspects raw statuses or envelope fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<T> {
    /// 2xx with a truthy envelope; payload extracted.
    Ok(T),
    /// 401 or 403. The session token is left untouched.
    AuthError,
    /// Transport failure: connect, timeout, or a body that is not valid
    /// JSON. The message is diagnostic, not user-facing.
    NetworkError(String),
    /// The server answered and refused; message passes through verbatim.
    DomainError(String),
}

impl<T> ApiResult<T> {
    /// Map the success payload, preserving failures.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Ok(value) => ApiResult::Ok(f(value)),
            Self::AuthError => ApiResult::AuthError,
            Self::NetworkError(m) => ApiResult::NetworkError(m),
            Self::DomainError(m) => ApiResult::DomainError(m),
        }
    }

    /// Convert into a `Result`, mapping each failure kind onto
    /// [`ClientError`].
    ///
    /// # Errors
    ///
    /// Returns the corresponding `ClientError` for every non-`Ok` variant.
    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::AuthError => Err(ClientError::Auth),
            Self::NetworkError(m) => Err(ClientError::Network(m)),
            Self::DomainError(m) => Err(ClientError::Domain(m)),
        }
    }

    /// Whether this is the `Ok` variant.
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// The backend's uniform response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP gateway for the Maejang REST API.
///
/// Cheaply cloneable; all shared pieces live behind an `Arc`.
pub struct ApiGateway<S: KvStore> {
    inner: Arc<GatewayInner<S>>,
}

impl<S: KvStore> Clone for ApiGateway<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct GatewayInner<S: KvStore> {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<S>,
    auth: AuthSession<S>,
}

impl<S: KvStore> ApiGateway<S> {
    /// Create a gateway from configuration and the shared local store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<S>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(GatewayInner {
                http,
                base_url: config.api_base_url.clone(),
                auth: AuthSession::new(Arc::clone(&store)),
                store,
            }),
        })
    }

    /// The auth session this gateway consults.
    #[must_use]
    pub fn auth(&self) -> &AuthSession<S> {
        &self.inner.auth
    }

    /// The shared local store (for mirrors kept next to API groups).
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.inner.store
    }

    /// `GET` an endpoint under `/api/v1/`.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.call(Method::GET, endpoint, None).await
    }

    /// `POST` a JSON body to an endpoint under `/api/v1/`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        match serde_json::to_value(body) {
            Ok(json) => self.call(Method::POST, endpoint, Some(json)).await,
            Err(e) => ApiResult::NetworkError(format!("request serialization: {e}")),
        }
    }

    /// `POST` with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.call(Method::POST, endpoint, None).await
    }

    /// `PATCH` a JSON body to an endpoint under `/api/v1/`.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        match serde_json::to_value(body) {
            Ok(json) => self.call(Method::PATCH, endpoint, Some(json)).await,
            Err(e) => ApiResult::NetworkError(format!("request serialization: {e}")),
        }
    }

    /// `DELETE` an endpoint under `/api/v1/`.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.call(Method::DELETE, endpoint, None).await
    }

    /// `POST` a multipart form (image uploads).
    #[instrument(skip(self, form), fields(endpoint = %endpoint))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        let url = match self.endpoint_url(endpoint) {
            Ok(url) => url,
            Err(e) => return ApiResult::NetworkError(e),
        };

        let mut request = self.inner.http.request(Method::POST, url).multipart(form);
        request = match self.attach_bearer(request) {
            Ok(r) => r,
            Err(e) => return ApiResult::NetworkError(e),
        };

        Self::finish(request).await
    }

    /// Core request path shared by all verbs.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let url = match self.endpoint_url(endpoint) {
            Ok(url) => url,
            Err(e) => return ApiResult::NetworkError(e),
        };

        let mut request = self.inner.http.request(method, url);
        request = match self.attach_bearer(request) {
            Ok(r) => r,
            Err(e) => return ApiResult::NetworkError(e),
        };
        if let Some(json) = body {
            request = request.json(&json);
        }

        Self::finish(request).await
    }

    /// Send a login-style request and surface the `Authorization` response
    /// header alongside the payload (the current backend generation returns
    /// the token there rather than in the body).
    pub(crate) async fn post_capturing_auth_header<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<(T, Option<String>)> {
        let url = match self.endpoint_url(endpoint) {
            Ok(url) => url,
            Err(e) => return ApiResult::NetworkError(e),
        };

        let response = match self.inner.http.post(url).json(body).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::NetworkError(e.to_string()),
        };

        let auth_header = response
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start_matches("Bearer ").to_string());

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => return ApiResult::NetworkError(e.to_string()),
        };

        extract_payload(normalize_response(status, &text)).map(|data| (data, auth_header))
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, String> {
        self.inner
            .base_url
            .join(&format!("/api/v1/{endpoint}"))
            .map_err(|e| format!("invalid endpoint {endpoint}: {e}"))
    }

    /// Attach the bearer token when one exists; anonymous otherwise.
    fn attach_bearer(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, String> {
        match self.inner.auth.token() {
            Ok(Some(token)) => Ok(request.bearer_auth(token)),
            Ok(None) => Ok(request),
            Err(e) => Err(format!("token read failed: {e}")),
        }
    }

    async fn finish<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> ApiResult<T> {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "transport failure");
                return ApiResult::NetworkError(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => return ApiResult::NetworkError(e.to_string()),
        };

        extract_payload(normalize_response(status, &text))
    }
}

/// Classify one response into the tagged result shape.
///
/// This is the single normalization boundary: auth statuses first, then
/// body shape, then the envelope's own verdict.
fn normalize_response(status: u16, body: &str) -> ApiResult<serde_json::Value> {
    if AuthClassification::of(status) == AuthClassification::AuthError {
        return ApiResult::AuthError;
    }

    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(e) => e,
        Err(e) => {
            warn!(status, error = %e, "malformed response body");
            return ApiResult::NetworkError(format!("malformed response body: {e}"));
        }
    };

    let success_status = (200..300).contains(&status);
    if !success_status || !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| format!("요청이 실패했습니다. (HTTP {status})"));
        return ApiResult::DomainError(message);
    }

    ApiResult::Ok(envelope.data.unwrap_or(serde_json::Value::Null))
}

/// Deserialize the envelope's `data` into the caller's type.
///
/// Endpoints that return no payload deserialize `null` into `()`.
fn extract_payload<T: DeserializeOwned>(raw: ApiResult<serde_json::Value>) -> ApiResult<T> {
    match raw {
        ApiResult::Ok(value) => match serde_json::from_value(value) {
            Ok(data) => ApiResult::Ok(data),
            Err(e) => ApiResult::NetworkError(format!("unexpected payload shape: {e}")),
        },
        ApiResult::AuthError => ApiResult::AuthError,
        ApiResult::NetworkError(m) => ApiResult::NetworkError(m),
        ApiResult::DomainError(m) => ApiResult::DomainError(m),
    }
}
