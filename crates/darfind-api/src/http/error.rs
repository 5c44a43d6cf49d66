//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{"detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use darfind_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or wrong `X-SECRET-KEY`.
    Unauthorized(String),
    /// Malformed request body.
    Validation(String),
    /// A chat turn failed.
    Chat(ChatError),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Chat(ChatError::Upstream(_)) => (
                StatusCode::BAD_GATEWAY,
                "The assistant is unavailable right now. Please try again.".to_string(),
            ),
            AppError::Chat(ChatError::SessionNotFound(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Chat session could not be found.".to_string(),
            ),
            AppError::Chat(ChatError::Persistence(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store the conversation.".to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
        }

        let body = json!({ "detail": message });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
