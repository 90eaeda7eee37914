//! Castrelay application composition root
//!
//! Builds the backend client and cookie policy from configuration, composes
//! the domain routers, and wraps everything in the session resolver layer.

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use castrelay_auth::{resolve_session, BackendClient, CookiePolicy, CurrentUser, SessionResolver};
use castrelay_common::Config;
use castrelay_sessions::SessionsState;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Largest request body accepted; credential forms are tiny
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let backend = BackendClient::new(&config.api_url, config.backend_timeout())?;
    let policy = CookiePolicy::for_environment(config.is_production());
    let resolver = SessionResolver::new(backend, policy);

    tracing::info!(
        api_url = %config.api_url,
        secure_cookies = config.is_production(),
        "Session relay configured"
    );

    let sessions_state = SessionsState {
        auth: resolver.clone(),
    };

    // Every route, including /health, passes through the resolver
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/session", get(current_session))
        .merge(castrelay_sessions::routes().with_state(sessions_state))
        .layer(middleware::from_fn_with_state(resolver, resolve_session));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Identity resolved for this request, for page renderers
async fn current_session(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "user": user }))
}

/// CORS layer for a comma-separated origin allow-list.
///
/// Credentials are allowed so the browser sends the session cookie.
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Request body limit applied in front of the form extractors
pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}
