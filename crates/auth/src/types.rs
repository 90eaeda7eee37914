//! Session types shared by the resolver and the credential flows

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SESSION_COOKIE_NAME;

/// Identity returned by the authentication API for a valid session token.
///
/// Built once per request and never mutated afterwards. `id` is kept exactly
/// as the backend sent it, whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub id: Value,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub is_active: bool,
}

/// Opaque session token issued by the backend.
///
/// The relay never inspects it; it is forwarded byte-for-byte.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw cookie value. Empty values are not tokens.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `access_token=<token>`, as sent in the `Cookie` header to the backend
    pub fn cookie_pair(&self) -> String {
        format!("{}={}", SESSION_COOKIE_NAME, self.0)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
