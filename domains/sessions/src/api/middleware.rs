//! Sessions domain state and session resolver integration

use axum::extract::FromRef;
use castrelay_auth::SessionResolver;

/// Application state for the Sessions domain
#[derive(Debug, Clone)]
pub struct SessionsState {
    pub auth: SessionResolver,
}

impl FromRef<SessionsState> for SessionResolver {
    fn from_ref(state: &SessionsState) -> Self {
        state.auth.clone()
    }
}
