//! GET /history/{session_id} - stored turns of a session.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use chatrelay_types::conversation::StoredMessage;

use crate::http::error::AppError;
use crate::state::AppState;

/// Response body for GET /history/{session_id}.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Vec<HistoryMessage>,
}

/// One stored turn, as returned to clients.
#[derive(Debug, Serialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredMessage> for HistoryMessage {
    fn from(message: StoredMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

/// GET /history/{session_id} - Oldest first; empty for unknown sessions.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let messages = state.chat_service.history(&session_id).await?;

    Ok(Json(HistoryResponse {
        session_id,
        messages: messages.into_iter().map(HistoryMessage::from).collect(),
    }))
}
