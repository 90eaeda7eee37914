//! Session cookie policy

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::types::SessionToken;

/// Name of the cookie carrying the session token, on both sides of the relay
pub const SESSION_COOKIE_NAME: &str = "access_token";

/// Session lifetime. Must equal the backend's own token lifetime.
pub const SESSION_LIFETIME: Duration = Duration::days(8);

/// Attributes applied whenever the relay sets or clears the session cookie.
///
/// Set and clear share one base builder: a cookie cleared with a different
/// path/secure/sameSite triple than it was set with is never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CookiePolicy {
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age: Duration,
}

impl CookiePolicy {
    /// Policy for a deployment; only production marks the cookie `Secure`.
    pub fn for_environment(production: bool) -> Self {
        Self {
            path: "/".to_string(),
            http_only: true,
            secure: production,
            same_site: SameSite::Lax,
            max_age: SESSION_LIFETIME,
        }
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .path(self.path.clone())
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .build()
    }

    /// Browser-facing session cookie for `token`
    pub fn session_cookie(&self, token: &SessionToken) -> Cookie<'static> {
        let mut cookie = self.base(token.as_str().to_string());
        cookie.set_max_age(self.max_age);
        cookie
    }

    /// Cookie that clears the session in the browser
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        cookie
    }

    /// Render a cookie for a `Set-Cookie` header.
    ///
    /// Uses the plain form (no percent-encoding) so tokens pass through unchanged.
    pub fn set_cookie_header(cookie: &Cookie<'_>) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&cookie.to_string())
    }

    pub fn session_header(&self, token: &SessionToken) -> Result<HeaderValue, InvalidHeaderValue> {
        Self::set_cookie_header(&self.session_cookie(token))
    }

    pub fn removal_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        Self::set_cookie_header(&self.removal_cookie())
    }
}
