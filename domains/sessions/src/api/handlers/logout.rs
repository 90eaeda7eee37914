//! Logout handler

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use castrelay_auth::session_token_from_headers;
use castrelay_common::Error;

use super::ANONYMOUS_LANDING;
use crate::api::middleware::SessionsState;
use crate::domain::state::{CredentialFlow, FlowEvent, FlowKind};

/// POST /logout
///
/// The backend is told on a best-effort basis; the local cookie is cleared
/// whatever it answers, including when it cannot be reached.
pub async fn logout(
    State(state): State<SessionsState>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    let mut flow = CredentialFlow::start(FlowKind::Logout);
    flow.advance(FlowEvent::Submit)?;
    flow.advance(FlowEvent::InputAccepted)?;

    let token = session_token_from_headers(&headers);
    if let Err(e) = state.auth.backend().logout(token.as_ref()).await {
        tracing::warn!(error = %e, "Backend logout failed, clearing local session anyway");
    }
    flow.advance(FlowEvent::BackendSettled)?;

    let removal = match state.auth.policy().removal_header() {
        Ok(removal) => removal,
        Err(e) => {
            flow.advance(FlowEvent::CookieUnavailable)?;
            return Err(Error::Internal(format!(
                "removal cookie is not a valid header: {e}"
            )));
        }
    };
    flow.advance(FlowEvent::CookieRelayed)?;

    Ok((
        AppendHeaders([(SET_COOKIE, removal)]),
        Redirect::to(ANONYMOUS_LANDING),
    )
        .into_response())
}
