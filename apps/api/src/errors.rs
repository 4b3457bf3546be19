use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is rendered as a JSON `{"error": "<message>"}` body, which is
/// the shape the UI pages display verbatim.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A required upstream credential is absent. Raised before any network call.
    #[error("{0}")]
    MissingConfig(String),

    /// The provider answered with an error status; that status is forwarded.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Llm(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, message } => AppError::Upstream { status, message },
            other => AppError::Llm(other.to_string()),
        }
    }
}

/// Malformed or mistyped request bodies are reported like any other bad input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Maps a failed feedback completion. An empty reply is reported the way
    /// the UI expects; provider errors keep their status and message.
    pub fn feedback(err: LlmError) -> Self {
        match err {
            LlmError::EmptyContent => AppError::Llm("Failed to generate feedback".to_string()),
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::MissingConfig(msg) => tracing::error!("Configuration error: {msg}"),
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream API error (status {status}): {message}")
            }
            AppError::Llm(msg) => tracing::error!("LLM error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::Unavailable(msg) => tracing::warn!("Service unavailable: {msg}"),
            AppError::Validation(_) | AppError::NotFound(_) => {}
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
