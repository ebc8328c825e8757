//! Application error types.
//!
//! Every variant carries diagnostic detail for the server log. Responses only
//! ever carry the generic message for the variant.

use agentchat_core::models::relay::ErrorResponse;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Server configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prediction API unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Prediction API returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid response format from prediction API: {0}")]
    InvalidFormat(String),
}

impl AppError {
    /// Status and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            ),
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m.as_str()),
            AppError::UpstreamUnreachable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error from prediction API",
            ),
            AppError::UpstreamStatus { status, .. } => {
                (passthrough_status(*status), "Error from prediction API")
            }
            AppError::InvalidFormat(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response format from API",
            ),
        }
    }
}

/// Upstream error statuses are passed through; anything else becomes 500.
fn passthrough_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{self}");
        } else {
            warn!(status = status.as_u16(), "{self}");
        }
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<BytesRejection> for AppError {
    fn from(e: BytesRejection) -> Self {
        warn!(rejection = %e.body_text(), "could not read request body");
        AppError::Validation("Invalid request body".into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        warn!(error = %e, "rejected request body");
        AppError::Validation("Invalid request body".into())
    }
}
