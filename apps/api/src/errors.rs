use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::roleplay::session::SessionError;

/// Message shown to end users whenever a character cannot answer.
pub const TRY_AGAIN_MESSAGE: &str = "The character is unavailable right now. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Validation(format!("invalid history: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                let (status, code) = match e {
                    LlmError::NotConfigured => {
                        (StatusCode::SERVICE_UNAVAILABLE, "LLM_NOT_CONFIGURED")
                    }
                    LlmError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "LLM_TIMEOUT"),
                    _ => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
                };
                (status, code, TRY_AGAIN_MESSAGE.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
