use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{ResourceKind, ServiceError};
use crate::models::ValidationErrors;

/// Everything a handler can fail with, mapped onto status codes.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with `{"errors": [{field, message}, ...]}`.
    Validation(ValidationErrors),
    /// 404 with `{"error": "<Kind> not found"}`.
    NotFound(ResourceKind),
    /// 400 with `{"error": ...}` for bodies that are not usable JSON.
    MalformedBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::warn!(%errors, "Rejected request");
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::NotFound(kind) => {
                let message = format!("{} not found", kind);
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::MalformedBody(message) => {
                tracing::warn!("Malformed request body: {}", message);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => Self::Validation(errors),
            ServiceError::NotFound(kind) => Self::NotFound(kind),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}
