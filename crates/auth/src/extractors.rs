//! Axum extractors for the resolved session
//!
//! Both read the `SessionContext` the resolver middleware attached; they
//! never call the backend themselves.

use axum::{extract::FromRequestParts, http::request::Parts};
use castrelay_common::Error;

use crate::context::SessionContext;
use crate::types::ResolvedIdentity;

fn session_context(parts: &Parts) -> Result<SessionContext, Error> {
    parts
        .extensions
        .get::<SessionContext>()
        .cloned()
        .ok_or_else(|| Error::Internal("session resolver layer is not installed".to_string()))
}

/// The caller's identity, if any. Never rejects an anonymous request.
#[derive(Debug)]
pub struct CurrentUser(pub Option<ResolvedIdentity>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(CurrentUser(session_context(parts)?.into_identity()))
    }
}

/// Authenticated caller; anonymous requests are rejected with 401.
#[derive(Debug)]
pub struct AuthUser(pub ResolvedIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        session_context(parts)?
            .into_identity()
            .map(AuthUser)
            .ok_or(Error::Unauthenticated)
    }
}
