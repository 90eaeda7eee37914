//! Login handlers

use axum::{extract::State, response::Response};
use castrelay_auth::{CurrentUser, LoginRequest};
use castrelay_common::{extractors::ValidatedFormRejection, ValidatedForm};

use super::{accept_input, form_page, relay_session, FlowError};
use crate::api::middleware::SessionsState;
use crate::domain::state::{CredentialFlow, FlowKind};
use crate::domain::validation::LoginForm;

const LOGIN_FAILED: &str = "Login failed";

/// GET /login
pub async fn login_page(CurrentUser(user): CurrentUser) -> Response {
    form_page(user, FlowKind::Login)
}

/// POST /login
pub async fn login(
    State(state): State<SessionsState>,
    input: Result<ValidatedForm<LoginForm>, ValidatedFormRejection>,
) -> Result<Response, FlowError> {
    let mut flow = CredentialFlow::start(FlowKind::Login);
    let form = accept_input(&mut flow, input)?;

    let request = LoginRequest {
        email: form.email,
        password: form.password,
    };
    let outcome = state.auth.backend().login(&request).await;

    relay_session(&mut flow, state.auth.policy(), outcome, LOGIN_FAILED)
}
