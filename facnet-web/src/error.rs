//! Error types for facnet-web

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::registration::{ValidationErrors, SUBMISSION_FAILED_MESSAGE};
use crate::services::RegistrationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Form rejected (422)
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Backend could not complete a request that needs confirmation (503)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Registration upload or insert failed (502)
    #[error("Submission failed")]
    SubmissionFailed,

    /// Details page could not be assembled (500)
    ///
    /// Rendered as an error panel with a way back to the directory.
    #[error("Failed to load center details")]
    PageLoadFailed,
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Invalid(errors) => ApiError::Validation(errors),
            RegistrationError::Upload(_) | RegistrationError::Persist(_) => {
                ApiError::SubmissionFailed
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                "Please correct the highlighted fields".to_string(),
            ),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE", msg.clone())
            }
            ApiError::SubmissionFailed => (
                StatusCode::BAD_GATEWAY,
                "SUBMISSION_FAILED",
                SUBMISSION_FAILED_MESSAGE.to_string(),
            ),
            ApiError::PageLoadFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PAGE_LOAD_FAILED",
                self.to_string(),
            ),
        };

        let mut error = json!({
            "code": error_code,
            "message": message,
        });
        match self {
            ApiError::Validation(fields) => error["fields"] = json!(fields),
            ApiError::PageLoadFailed => error["back_to"] = json!("/"),
            _ => {}
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
