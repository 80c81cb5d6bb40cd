//! JSON body extractor with field validation
//!
//! `ValidatedJson<T>` deserializes like `axum::Json<T>` and then runs
//! `validator::Validate` on the result. Both failure kinds are answered with
//! the same `{"detail": "..."}` body the handlers use.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ErrorResponse;

/// Request body that has been parsed and has passed `Validate`.
pub struct ValidatedJson<T>(pub T);

/// Why a body was refused.
#[derive(Debug)]
pub enum BodyRejection {
    /// Not JSON, wrong content type, or wrong shape. Keeps axum's status.
    Malformed(JsonRejection),
    /// Parsed, but at least one field failed validation.
    Invalid(ValidationErrors),
}

impl BodyRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Malformed(rejection) => rejection.status(),
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::Malformed(rejection) => format!("Invalid JSON: {}", rejection.body_text()),
            Self::Invalid(errors) => describe_field_errors(errors),
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.detail()))).into_response()
    }
}

/// `field: message` pairs, sorted, joined by `; `.
fn describe_field_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", err.code),
            })
        })
        .collect();

    if parts.is_empty() {
        return "Validation failed".to_string();
    }
    parts.sort();
    parts.join("; ")
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;
        value.validate().map_err(BodyRejection::Invalid)?;
        Ok(Self(value))
    }
}
