//! Maps domain failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::tasks::store::StoreError;
use crate::tasks::validate::{FieldErrors, NON_FIELD};

/// Request-level failure: `NotFound` → 404 empty body, `Validation` → 400
/// with the field-error map as body, anything else → 500 with a terse body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            // Storage-boundary rejection (CHECK / NOT NULL) → 400, not 500.
            StoreError::Constraint(msg) => {
                let mut errors = FieldErrors::new();
                errors.insert(NON_FIELD.to_string(), vec![msg]);
                ApiError::Validation(errors)
            }
            other => ApiError::Store(other),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(err = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
