//! Route definitions for Sessions domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{login, logout, signup};
use super::middleware::SessionsState;

/// Create all Sessions domain routes
pub fn routes() -> Router<SessionsState> {
    Router::new()
        .route("/login", get(login::login_page).post(login::login))
        .route("/signup", get(signup::signup_page).post(signup::signup))
        .route("/logout", post(logout::logout))
}
