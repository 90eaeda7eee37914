//! Session resolver middleware
//!
//! Runs once per request: validates the session token against the backend
//! and attaches the resulting identity (or none) to the request. Resolution
//! never fails the request; an auth outage degrades to anonymous.

use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::Response,
};

use crate::backend::{BackendClient, WhoAmI};
use crate::config::{CookiePolicy, SESSION_COOKIE_NAME};
use crate::context::SessionContext;
use crate::cookies::{session_token_from_headers, sets_cookie};
use crate::error::BackendError;
use crate::types::{ResolvedIdentity, SessionToken};

/// Result of validating one session token
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedIdentity),
    /// Backend explicitly refused the token; the browser cookie must go
    Invalid,
    /// Backend could not be asked; the token may still be valid
    TransportError(BackendError),
}

/// Backend client plus cookie policy, shared read-only by every request.
///
/// Domain states expose this via `FromRef`.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    backend: BackendClient,
    policy: CookiePolicy,
}

impl SessionResolver {
    pub fn new(backend: BackendClient, policy: CookiePolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn policy(&self) -> &CookiePolicy {
        &self.policy
    }

    /// Validate `token` with a single backend call
    pub async fn resolve(&self, token: &SessionToken) -> Resolution {
        match self.backend.who_am_i(token).await {
            Ok(WhoAmI::Identity(identity)) => Resolution::Resolved(identity),
            Ok(WhoAmI::Rejected(status)) => {
                tracing::debug!(status = %status, "Backend rejected session token");
                Resolution::Invalid
            }
            Err(e) => Resolution::TransportError(e),
        }
    }
}

/// Middleware attaching a `SessionContext` to every request.
///
/// Install with `axum::middleware::from_fn_with_state(resolver, resolve_session)`.
pub async fn resolve_session(
    State(resolver): State<SessionResolver>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut clear_cookie = false;

    let identity = match session_token_from_headers(request.headers()) {
        None => None,
        Some(token) => match resolver.resolve(&token).await {
            Resolution::Resolved(identity) => Some(identity),
            Resolution::Invalid => {
                clear_cookie = true;
                None
            }
            Resolution::TransportError(e) => {
                tracing::warn!(error = %e, "Auth check failed, continuing without identity");
                None
            }
        },
    };

    request
        .extensions_mut()
        .insert(SessionContext::new(identity));

    let mut response = next.run(request).await;

    // A handler that issued a fresh session cookie takes precedence
    if clear_cookie && !sets_cookie(response.headers(), SESSION_COOKIE_NAME) {
        match resolver.policy().removal_header() {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render session removal cookie");
            }
        }
    }

    response
}
