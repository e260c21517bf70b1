//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ClinicError;

/// Structured error response body.
///
/// `form` echoes the submitted form back so the caller can re-present it
/// with the error inline.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {message}")]
    Conflict {
        message: String,
        form: Option<serde_json::Value>,
    },
    #[error("Invalid request: {message}")]
    BadRequest {
        message: String,
        form: Option<serde_json::Value>,
    },
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            form: None,
        }
    }

    /// Attach the submitted form to form-level errors (409/400).
    pub fn with_form<F: Serialize>(self, form: &F) -> Self {
        let echoed = serde_json::to_value(form).ok();
        match self {
            ApiError::Conflict { message, .. } => ApiError::Conflict { message, form: echoed },
            ApiError::BadRequest { message, .. } => ApiError::BadRequest { message, form: echoed },
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, form) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
                None,
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail, None),
            ApiError::Conflict { message, form } => {
                (StatusCode::CONFLICT, "ALREADY_EXISTS", message, form)
            }
            ApiError::BadRequest { message, form } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message, form)
            }
            ApiError::Unavailable(detail) => {
                tracing::error!(detail = %detail, "Storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UNAVAILABLE",
                    "Storage is unavailable".to_string(),
                    None,
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
            form,
        };
        (status, Json(body)).into_response()
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        match err {
            ClinicError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ClinicError::AlreadyExists { .. } => ApiError::Conflict {
                message: err.to_string(),
                form: None,
            },
            ClinicError::InvalidInput(message) => ApiError::BadRequest { message, form: None },
            ClinicError::StorageUnavailable(detail) => ApiError::Unavailable(detail),
            ClinicError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}
