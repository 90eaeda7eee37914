//! Cookie header parsing
//!
//! Structured parsing of `Cookie` request headers and `Set-Cookie` response
//! headers; cookies are looked up by name, never by matching raw text.

use std::collections::HashMap;

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap,
};
use axum_extra::extract::cookie::Cookie;

use crate::config::SESSION_COOKIE_NAME;
use crate::types::SessionToken;

/// Read the session token from the request's `Cookie` header(s).
///
/// A present-but-empty `access_token` counts as no token.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .and_then(|cookie| SessionToken::new(cookie.value()))
}

/// Parse every `Set-Cookie` header into a name → cookie map.
///
/// Unparsable entries are skipped; a later cookie with the same name wins,
/// as it would in the browser.
pub fn parse_set_cookies(headers: &HeaderMap) -> HashMap<String, Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_string()).ok())
        .map(|cookie| (cookie.name().to_string(), cookie))
        .collect()
}

/// Whether the response already sets a cookie called `name`
pub fn sets_cookie(headers: &HeaderMap, name: &str) -> bool {
    parse_set_cookies(headers).contains_key(name)
}
