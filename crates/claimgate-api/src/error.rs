//! API error types for workflow endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use claimgate_workflow::WorkflowError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client handling.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// Workflow API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain error from the workflow crate.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Request-shape validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Actor identity missing or malformed.
    #[error("Actor identity required")]
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Self::Workflow(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, "not_found", e.to_string())
                } else if e.is_forbidden() {
                    (StatusCode::FORBIDDEN, "forbidden", e.to_string())
                } else if e.is_conflict() {
                    (StatusCode::CONFLICT, "conflict", e.to_string())
                } else if e.is_validation() {
                    (StatusCode::BAD_REQUEST, "validation_error", e.to_string())
                } else {
                    match e {
                        WorkflowError::InvalidState { .. }
                        | WorkflowError::DocumentInvalidState { .. } => {
                            (StatusCode::CONFLICT, "invalid_state", e.to_string())
                        }
                        WorkflowError::Expired { .. } => {
                            (StatusCode::GONE, "expired", e.to_string())
                        }
                        WorkflowError::Store(msg) => {
                            tracing::error!("store error: {msg}");
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "internal_error",
                                "An internal error occurred".to_string(),
                            )
                        }
                        _ => {
                            tracing::error!("unhandled workflow error: {e:?}");
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "internal_error",
                                "An internal error occurred".to_string(),
                            )
                        }
                    }
                }
            }
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Actor identity required".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
