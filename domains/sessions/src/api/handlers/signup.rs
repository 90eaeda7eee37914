//! Signup handlers

use axum::{extract::State, response::Response};
use castrelay_auth::{CurrentUser, SignupRequest};
use castrelay_common::{extractors::ValidatedFormRejection, ValidatedForm};

use super::{accept_input, form_page, relay_session, FlowError};
use crate::api::middleware::SessionsState;
use crate::domain::state::{CredentialFlow, FlowKind};
use crate::domain::validation::SignupForm;

const SIGNUP_FAILED: &str = "Signup failed";

/// GET /signup
pub async fn signup_page(CurrentUser(user): CurrentUser) -> Response {
    form_page(user, FlowKind::Signup)
}

/// POST /signup
pub async fn signup(
    State(state): State<SessionsState>,
    input: Result<ValidatedForm<SignupForm>, ValidatedFormRejection>,
) -> Result<Response, FlowError> {
    let mut flow = CredentialFlow::start(FlowKind::Signup);
    let form = accept_input(&mut flow, input)?;

    let request = SignupRequest {
        full_name: form.display_name(),
        email: form.email,
        password: form.password,
    };
    let outcome = state.auth.backend().signup(&request).await;

    relay_session(&mut flow, state.auth.policy(), outcome, SIGNUP_FAILED)
}
