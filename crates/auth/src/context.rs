//! Request-scoped session context

use crate::types::ResolvedIdentity;

/// Identity resolved for the current request, or none.
///
/// Inserted into request extensions by the session resolver; this is the
/// only thing downstream code reads about the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    identity: Option<ResolvedIdentity>,
}

impl SessionContext {
    pub fn new(identity: Option<ResolvedIdentity>) -> Self {
        Self { identity }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&ResolvedIdentity> {
        self.identity.as_ref()
    }

    pub fn into_identity(self) -> Option<ResolvedIdentity> {
        self.identity
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
