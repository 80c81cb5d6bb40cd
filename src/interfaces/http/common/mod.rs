//! Shared HTTP response bodies and error mapping

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Acknowledgement body for mutations: `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "user created successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Email must be @gmail.com")]
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain failure to a status code and body.
///
/// Internal failures are logged here and reach the client only as a
/// generic message.
pub fn domain_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) | DomainError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let detail = if e.is_internal() {
        error!(error = %e, "Request failed");
        "Internal server error".to_string()
    } else {
        e.to_string()
    };

    (status, Json(ErrorResponse::new(detail)))
}
