//! Custom axum extractors for Castrelay

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::FormRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::Error;

/// Form extractor that validates the deserialized value automatically.
///
/// Browser forms arrive as `application/x-www-form-urlencoded`; the relay
/// re-encodes them as JSON only when talking to the backend.
///
/// All input errors (deserialization + validation) return 400.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

/// Rejection type for `ValidatedForm`:
/// - form decoding errors → 400 (via `Error::Validation`)
/// - validation errors → 400 (via `Error::Validation`)
#[derive(Debug)]
pub enum ValidatedFormRejection {
    Form(FormRejection),
    Validation(Error),
}

impl ValidatedFormRejection {
    /// The error this rejection renders as
    pub fn into_error(self) -> Error {
        match self {
            ValidatedFormRejection::Form(e) => Error::Validation(e.body_text()),
            ValidatedFormRejection::Validation(e) => e,
        }
    }
}

impl IntoResponse for ValidatedFormRejection {
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedFormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(ValidatedFormRejection::Form)?;
        value.validate().map_err(|e| {
            ValidatedFormRejection::Validation(Error::Validation(first_message(&e)))
        })?;
        Ok(ValidatedForm(value))
    }
}

/// Pick the message of the first failing field, in field-name order.
///
/// Ordering by name keeps the reported message stable across requests.
pub fn first_message(errors: &ValidationErrors) -> String {
    let ordered: BTreeMap<String, _> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();

    ordered
        .iter()
        .find_map(|(field, errs)| {
            errs.first().map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .unwrap_or_else(|| "Invalid form submission".to_string())
}
