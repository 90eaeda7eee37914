//! Session relay core for Castrelay
//!
//! Validates the browser's session token against the authentication API on
//! every request, and provides the cookie policy, backend client, and axum
//! extractors the credential flows build on.

mod backend;
mod config;
mod context;
mod cookies;
mod error;
mod extractors;
mod resolver;
mod types;

pub use backend::{
    BackendClient, BackendFailure, BackendReply, IssuedCookies, LoginRequest, SignupRequest,
    WhoAmI,
};
pub use config::{CookiePolicy, SESSION_COOKIE_NAME, SESSION_LIFETIME};
pub use context::SessionContext;
pub use cookies::{parse_set_cookies, session_token_from_headers, sets_cookie};
pub use error::BackendError;
pub use extractors::{AuthUser, CurrentUser};
pub use resolver::{resolve_session, Resolution, SessionResolver};
pub use types::{ResolvedIdentity, SessionToken};

/// Re-export of the cookie type used throughout the public API.
pub use axum_extra::extract::cookie::{Cookie, SameSite};
