//! POST /chat - run one chat turn.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted, `null` and `""` all start a new session.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// POST /chat - Append the user's message, generate a reply, return both ids.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;

    let reply = state
        .chat_service
        .chat(&request.message, request.session_id)
        .await?;

    Ok(Json(ChatResponse {
        response: reply.reply,
        session_id: reply.session_id,
    }))
}
