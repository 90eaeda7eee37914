//! Common error types and handling for Castrelay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown to the browser for any failure on our side
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the relay
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("{0}")]
    Validation(String),

    /// Non-success reply from the authentication API, passed through
    #[error("{detail}")]
    Backend { status: StatusCode, detail: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Backend { status, .. } => *status,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::Unexpected(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Backend { .. } => "BACKEND_REJECTED",
            Error::Unauthenticated => "UNAUTHENTICATED",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show the browser. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::Unexpected(_) | Error::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Log internal errors with full context
        if status.is_server_error() {
            tracing::error!(error = %self, "Internal server error");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}
