//! REST API helpers for the backend session endpoints and the site relay.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` talks to the backend (`/auth/*`) and implements
//! [`AuthBackend`], the seam the auth context depends on. `SiteClient` talks
//! to the site server (`/api/forgot-password`, `/healthz`).
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes an [`ApiError`]. Non-2xx backend responses keep the
//! status and the backend's `detail` message so callers can show or log it.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::types::{ForgotPasswordRequest, LoginRequest, RegisterRequest, TokenResponse, User};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SITE_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const ME_PATH: &str = "/auth/me";
const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const FORGOT_PASSWORD_PATH: &str = "/api/forgot-password";
const HEALTH_PATH: &str = "/healthz";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend and site HTTP calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// The response body was not the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Where to send requests and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl ApiConfig {
    /// Build a config for `base_url` with default timeouts. A trailing `/` is
    /// dropped so paths can be appended directly.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, timeouts: Timeouts::default() }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn build_http(timeouts: Timeouts) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| ApiError::HttpClientBuild(e.to_string()))
}

// =============================================================================
// AUTH BACKEND
// =============================================================================

/// Backend session endpoints consumed by the auth context.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Resolve the identity behind a bearer credential.
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;

    /// Exchange email and password for a credential and identity.
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError>;

    /// Create an account and return its credential and identity.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<TokenResponse, ApiError>;
}

/// HTTP client for the backend API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self { http: build_http(config.timeouts)?, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait::async_trait]
impl AuthBackend for ApiClient {
    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let request = self.http.get(self.endpoint(ME_PATH)).bearer_auth(token);
        send_json(request).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        send_json(self.http.post(self.endpoint(LOGIN_PATH)).json(&body)).await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = RegisterRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() };
        send_json(self.http.post(self.endpoint(REGISTER_PATH)).json(&body)).await
    }
}

/// Send a request and decode a 2xx JSON body. Anything else is an error.
async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), detail: parse_detail(&text) });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the backend's `detail` field out of an error body.
///
/// Plain string details come back as-is; structured ones (validation error
/// lists) are rendered as compact JSON.
fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

// =============================================================================
// SITE CLIENT
// =============================================================================

/// Status and body returned through the forgot-password relay, unjudged.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RelayReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the site server itself.
pub struct SiteClient {
    http: reqwest::Client,
    base_url: String,
}

impl SiteClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self { http: build_http(config.timeouts)?, base_url: config.base_url.clone() })
    }

    /// Submit a forgot-password request through the relay.
    ///
    /// # Errors
    ///
    /// Only transport and decode failures are errors; any status the relay
    /// answers with is returned in the [`RelayReply`].
    pub async fn forgot_password(&self, email: &str) -> Result<RelayReply, ApiError> {
        let body = ForgotPasswordRequest { email: Some(email.into()) };
        let response = self
            .http
            .post(format!("{}{FORGOT_PASSWORD_PATH}", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(RelayReply { status, body })
    }

    /// Probe the site health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the site is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), detail: None });
        }
        Ok(())
    }
}
