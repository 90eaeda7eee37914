//! Authentication API client
//!
//! Thin typed wrapper over the four backend operations the relay consumes.
//! Non-success replies come back as data; only transport-class failures
//! surface as `BackendError`.

use std::collections::HashMap;
use std::time::Duration;

use axum::http::{
    header::{ACCEPT, COOKIE},
    StatusCode,
};
use axum_extra::extract::cookie::Cookie;
use serde::Serialize;
use serde_json::Value;

use crate::config::SESSION_COOKIE_NAME;
use crate::cookies::parse_set_cookies;
use crate::error::BackendError;
use crate::types::{ResolvedIdentity, SessionToken};

/// Outcome of `GET /auth/me`
#[derive(Debug, Clone, PartialEq)]
pub enum WhoAmI {
    Identity(ResolvedIdentity),
    /// Backend refused the token (invalid or expired)
    Rejected(StatusCode),
}

/// Non-success reply from the backend, with its `detail` if it sent one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub status: StatusCode,
    pub detail: Option<String>,
}

/// A reply the backend actually produced: success payload or structured failure
#[derive(Debug, Clone, PartialEq)]
pub enum BackendReply<T> {
    Success(T),
    Failure(BackendFailure),
}

/// Cookies from the backend's `Set-Cookie` headers, keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuedCookies(HashMap<String, Cookie<'static>>);

impl IssuedCookies {
    pub fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.0.get(name)
    }

    /// The issued `access_token` cookie, if the backend sent a non-empty one
    pub fn session_cookie(&self) -> Option<&Cookie<'static>> {
        self.get(SESSION_COOKIE_NAME)
            .filter(|cookie| !cookie.value().is_empty())
    }

    pub fn session_token(&self) -> Option<SessionToken> {
        self.session_cookie()
            .and_then(|cookie| SessionToken::new(cookie.value()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `POST /auth/login` body
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `POST /auth/signup` body; `full_name` is left out when absent
#[derive(Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// HTTP client for the authentication API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000/api/v1`).
    ///
    /// `timeout` bounds every call; a call that exceeds it is a transport failure.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /auth/me`: validate a session token
    pub async fn who_am_i(&self, token: &SessionToken) -> Result<WhoAmI, BackendError> {
        let response = self
            .http
            .get(self.endpoint("/auth/me"))
            .header(ACCEPT, "application/json")
            .header(COOKIE, token.cookie_pair())
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(WhoAmI::Rejected(status));
        }

        let identity = response
            .json::<ResolvedIdentity>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        Ok(WhoAmI::Identity(identity))
    }

    /// `POST /auth/login`
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<BackendReply<IssuedCookies>, BackendError> {
        self.post_credentials("/auth/login", request).await
    }

    /// `POST /auth/signup`
    pub async fn signup(
        &self,
        request: &SignupRequest,
    ) -> Result<BackendReply<IssuedCookies>, BackendError> {
        self.post_credentials("/auth/signup", request).await
    }

    /// `POST /auth/logout`. Best-effort; any HTTP status is accepted.
    pub async fn logout(&self, token: Option<&SessionToken>) -> Result<StatusCode, BackendError> {
        let mut builder = self
            .http
            .post(self.endpoint("/auth/logout"))
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.header(COOKIE, token.cookie_pair());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "Backend logout returned non-success status");
        }

        Ok(status)
    }

    async fn post_credentials<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<BackendReply<IssuedCookies>, BackendError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // A body we cannot read or decode just means "no detail"
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| failure_detail(&body));
            return Ok(BackendReply::Failure(BackendFailure { status, detail }));
        }

        let cookies = parse_set_cookies(response.headers());
        Ok(BackendReply::Success(IssuedCookies(cookies)))
    }
}

/// `detail` of an error body, when it is a plain message
fn failure_detail(body: &Value) -> Option<String> {
    body.get("detail")
        .and_then(Value::as_str)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
