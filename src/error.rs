use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::ports::UnprotectError;

/// Infrastructure faults escaping the authentication core.
///
/// Rejected credentials are reported through
/// [`crate::domain::outcome::AuthenticateOutcome`], never through this type.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("ticket unprotection failed: {0}")]
    Unprotect(#[from] UnprotectError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        tracing::error!(error = %e, "authentication infrastructure failure");
        AppError::internal("Authentication unavailable", json!({}))
    }
}
