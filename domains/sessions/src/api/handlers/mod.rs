//! Credential flow handlers
//!
//! Login and signup share one relay path: validate the form, call the
//! backend once, and re-issue the backend's `access_token` under the local
//! cookie policy. Logout always clears the local cookie.

pub mod login;
pub mod logout;
pub mod signup;

use axum::{
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Json,
};
use castrelay_auth::{
    BackendError, BackendReply, CookiePolicy, IssuedCookies, ResolvedIdentity,
};
use castrelay_common::{extractors::ValidatedFormRejection, Error, ValidatedForm};
use serde::Serialize;

use crate::domain::state::{CredentialFlow, FlowEvent, FlowKind, StateError};

/// Where a signed-in user lands
pub const AUTHENTICATED_LANDING: &str = "/dashboard";

/// Where a signed-out user lands
pub const ANONYMOUS_LANDING: &str = "/";

/// Form state handed to the page renderer.
///
/// `error` is set when a submission was rejected and the form is shown again.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: FlowKind,
    pub error: Option<String>,
}

/// Why a login or signup submission did not end in a redirect
#[derive(Debug)]
pub enum FlowError {
    /// Input or credentials refused; the form is rendered again with `message`
    Rejected {
        form: FlowKind,
        status: StatusCode,
        message: String,
    },
    /// Failure on our side or in transport; rendered as the generic error
    Errored(Error),
}

impl FlowError {
    /// Re-render `form` with the public message and status of `error`
    pub fn rejected(form: FlowKind, error: Error) -> Self {
        FlowError::Rejected {
            form,
            status: error.status_code(),
            message: error.public_message(),
        }
    }
}

impl From<Error> for FlowError {
    fn from(error: Error) -> Self {
        FlowError::Errored(error)
    }
}

impl From<StateError> for FlowError {
    fn from(error: StateError) -> Self {
        FlowError::Errored(error.into())
    }
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        match self {
            FlowError::Rejected {
                form,
                status,
                message,
            } => {
                let page = FormPage {
                    form,
                    error: Some(message),
                };
                (status, Json(page)).into_response()
            }
            FlowError::Errored(error) => error.into_response(),
        }
    }
}

/// Load step shared by the login and signup pages.
///
/// Users who are already signed in are sent to the landing page instead of
/// being offered the form again.
pub(crate) fn form_page(user: Option<ResolvedIdentity>, form: FlowKind) -> Response {
    if user.is_some() {
        return Redirect::to(AUTHENTICATED_LANDING).into_response();
    }

    Json(FormPage { form, error: None }).into_response()
}

/// Move the flow through input validation
pub(crate) fn accept_input<T>(
    flow: &mut CredentialFlow,
    input: Result<ValidatedForm<T>, ValidatedFormRejection>,
) -> Result<T, FlowError> {
    flow.advance(FlowEvent::Submit)?;

    match input {
        Ok(ValidatedForm(form)) => {
            flow.advance(FlowEvent::InputAccepted)?;
            Ok(form)
        }
        Err(rejection) => {
            flow.advance(FlowEvent::InputInvalid)?;
            Err(FlowError::rejected(flow.kind(), rejection.into_error()))
        }
    }
}

/// Turn a login/signup backend outcome into the browser response.
///
/// `fallback_detail` is shown when the backend refuses without a detail.
pub(crate) fn relay_session(
    flow: &mut CredentialFlow,
    policy: &CookiePolicy,
    outcome: Result<BackendReply<IssuedCookies>, BackendError>,
    fallback_detail: &str,
) -> Result<Response, FlowError> {
    let issued = match outcome {
        Ok(BackendReply::Success(issued)) => issued,
        Ok(BackendReply::Failure(failure)) => {
            flow.advance(FlowEvent::BackendRejected)?;
            let error = Error::Backend {
                status: failure.status,
                detail: failure
                    .detail
                    .unwrap_or_else(|| fallback_detail.to_string()),
            };
            return Err(FlowError::rejected(flow.kind(), error));
        }
        Err(e) => {
            flow.advance(FlowEvent::BackendFailed)?;
            tracing::error!(flow = %flow.kind(), error = %e, "Credential flow backend call failed");
            return Err(Error::Internal(e.to_string()).into());
        }
    };

    flow.advance(FlowEvent::BackendSettled)?;

    let Some(token) = issued.session_token() else {
        flow.advance(FlowEvent::CookieUnavailable)?;
        tracing::error!(
            flow = %flow.kind(),
            cookies = issued.len(),
            "Backend reported success without an access_token cookie"
        );
        return Err(Error::Internal("backend issued no session cookie".to_string()).into());
    };

    if let Some(backend_max_age) = issued.session_cookie().and_then(|c| c.max_age()) {
        if backend_max_age != policy.max_age {
            tracing::warn!(
                backend_max_age = backend_max_age.whole_seconds(),
                relay_max_age = policy.max_age.whole_seconds(),
                "Backend session lifetime differs from the cookie policy"
            );
        }
    }

    let cookie = match policy.session_header(&token) {
        Ok(cookie) => cookie,
        Err(e) => {
            flow.advance(FlowEvent::CookieUnavailable)?;
            return Err(Error::Internal(format!("session cookie is not a valid header: {e}")).into());
        }
    };

    flow.advance(FlowEvent::CookieRelayed)?;

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(AUTHENTICATED_LANDING),
    )
        .into_response())
}
