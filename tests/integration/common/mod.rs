//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests including:
//! - A mocked authentication API per test
//! - The composed application router
//! - Request builders and response assertions

use anyhow::Result;
use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Method, Request,
    },
    response::Response,
    Router,
};
use castrelay_auth::Cookie;
use castrelay_common::Config;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const USER_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
pub const USER_EMAIL: &str = "grace@example.com";

/// Identity payload the mocked API returns from `/auth/me`
pub fn identity_body() -> Value {
    json!({
        "id": USER_ID,
        "email": USER_EMAIL,
        "full_name": "Grace Hopper",
        "is_active": true
    })
}

/// Test application backed by its own mock authentication API
pub struct TestApp {
    pub backend: MockServer,
    pub config: Config,
}

impl TestApp {
    /// Development configuration (cookies not marked `Secure`)
    pub async fn new() -> Self {
        Self::with_environment("development").await
    }

    /// Production configuration (cookies marked `Secure`)
    pub async fn production() -> Self {
        Self::with_environment("production").await
    }

    async fn with_environment(environment: &str) -> Self {
        let backend = MockServer::start().await;
        let config = Config {
            api_url: format!("{}/api/v1", backend.uri()),
            environment: environment.to_string(),
            backend_timeout_secs: 2,
            ..Config::default()
        };
        Self { backend, config }
    }

    pub fn router(&self) -> Result<Router> {
        castrelay_app::create_app(&self.config)
    }

    /// Send one request through a freshly composed router
    pub async fn send(&self, request: Request<Body>) -> Result<Response> {
        Ok(self.router()?.oneshot(request).await?)
    }

    pub async fn mock_whoami(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(template)
            .mount(&self.backend)
            .await;
    }

    /// Mock that fails the test on drop if the endpoint was ever called
    pub async fn forbid_call(&self, http_method: &str, endpoint: &str) {
        Mock::given(method(http_method))
            .and(path(format!("/api/v1{endpoint}")))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.backend)
            .await;
    }
}

/// Port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// All `Set-Cookie` headers on a response, parsed
pub fn set_cookies(response: &Response) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| Cookie::parse(v.to_str().unwrap().to_string()).unwrap())
        .collect()
}

/// The single `access_token` cookie set by a response
pub fn session_cookie(response: &Response) -> Cookie<'static> {
    let cookies: Vec<_> = set_cookies(response)
        .into_iter()
        .filter(|c| c.name() == "access_token")
        .collect();
    assert_eq!(cookies.len(), 1, "expected exactly one access_token cookie");
    cookies.into_iter().next().unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The error shown on a re-rendered form: `(form, error)`
pub async fn form_error(response: Response) -> (String, String) {
    let page = body_json(response).await;
    let field = |name: &str| page[name].as_str().unwrap_or_default().to_string();
    (field("form"), field("error"))
}

/// The public message of a generic JSON error response
pub async fn error_message(response: Response) -> String {
    body_json(response).await["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}
