//! Credential form input and its validation rules
//!
//! Only shape is checked here; credentials themselves are verified by the
//! backend. Missing fields deserialize as empty strings so they fail the
//! same "required" rule as blank ones.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";

/// Minimum signup password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Login form as submitted by the browser
#[derive(Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub password: String,
}

/// Signup form as submitted by the browser
#[derive(Clone, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_signup_password"))]
    pub password: String,

    #[serde(default)]
    pub full_name: Option<String>,
}

impl SignupForm {
    /// Display name to forward, if the user actually entered one
    pub fn display_name(&self) -> Option<String> {
        self.full_name.clone().filter(|name| !name.is_empty())
    }
}

fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(CREDENTIALS_REQUIRED)));
    }
    Ok(())
}

/// Length is counted in Unicode scalar values
fn validate_signup_password(password: &str) -> Result<(), ValidationError> {
    validate_required(password)?;
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed(PASSWORD_TOO_SHORT)));
    }
    Ok(())
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}
