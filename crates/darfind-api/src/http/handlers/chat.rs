//! `POST /chatbot`: run one chat turn for the caller's session.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::session::SessionCookie;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chatbot
///
/// Authentication runs first, so a rejected request never touches the
/// session store or the model.
pub async fn chat(
    _auth: Authenticated,
    State(state): State<AppState>,
    session: SessionCookie,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let reply = state
        .chat_service
        .handle_turn(&session.id, &request.user_input)
        .await?;

    let mut response = Json(ChatResponse { response: reply }).into_response();

    if let Some(cookie) = session.set_cookie() {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid session cookie: {e}")))?;
        response.headers_mut().insert(SET_COOKIE, value);
    }

    Ok(response)
}
