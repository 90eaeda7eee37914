//! Backend client errors

use thiserror::Error;

/// Transport-class failure talking to the authentication API.
///
/// A non-success HTTP reply is not an error here; it is returned as data
/// (`WhoAmI::Rejected`, `BackendReply::Failure`) for the caller to classify.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend client configuration error: {0}")]
    Client(String),

    #[error("Backend request error: {0}")]
    Transport(String),

    #[error("Backend response error: {0}")]
    Malformed(String),
}
