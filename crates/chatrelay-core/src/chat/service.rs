//! Chat service orchestrating the per-request pipeline.
//!
//! `ChatService` sequences one chat turn:
//!
//! 1. resolve the session id (generate one when absent or empty)
//! 2. read the session's history
//! 3. append the user's message
//! 4. ask the completion client for a reply
//! 5. append the assistant's reply
//! 6. return `{reply, session_id}`
//!
//! A failure at any step aborts the rest. Earlier writes are kept: if
//! generation fails after step 3, the user's message stays in the log.

use chatrelay_types::conversation::{ChatReply, Role, StoredMessage};
use chatrelay_types::error::RepositoryError;
use chatrelay_types::llm::LlmError;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::completion::CompletionClient;
use crate::chat::store::ConversationStore;

/// Failure of a chat pipeline step.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The conversation store could not be read or written.
    #[error(transparent)]
    Persistence(#[from] RepositoryError),

    /// The completion service failed or returned nothing usable.
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

/// Orchestrates chat turns and history reads.
///
/// Generic over `ConversationStore` to maintain clean architecture
/// (chatrelay-core never depends on chatrelay-infra). Holds no per-session
/// state: every call rehydrates context from the store.
pub struct ChatService<S: ConversationStore> {
    store: S,
    completion: CompletionClient,
}

impl<S: ConversationStore> ChatService<S> {
    /// Create a new chat service over the given store and completion client.
    pub fn new(store: S, completion: CompletionClient) -> Self {
        Self { store, completion }
    }

    /// Run one chat turn.
    pub async fn chat(
        &self,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatReply, ChatError> {
        let session_id = resolve_session_id(session_id);

        let history = self.store.read(&session_id).await?;
        debug!(session_id = %session_id, turns = history.len(), "Loaded conversation context");

        self.store.append(&session_id, Role::User, message).await?;

        let reply = match self.completion.complete(message, &history).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    error = %e,
                    "Completion failed; user message remains stored"
                );
                return Err(e.into());
            }
        };

        self.store
            .append(&session_id, Role::Assistant, &reply)
            .await?;

        info!(session_id = %session_id, reply_len = reply.len(), "Chat turn completed");

        Ok(ChatReply { reply, session_id })
    }

    /// All stored turns of a session, oldest first. Empty for unknown sessions.
    pub async fn history(&self, session_id: &str) -> Result<Vec<StoredMessage>, RepositoryError> {
        self.store.read(session_id).await
    }

    /// Every distinct session id in the store.
    pub async fn list_sessions(&self) -> Result<Vec<String>, RepositoryError> {
        self.store.list_sessions().await
    }
}

/// Use the caller's session id, or mint a new one when it is missing or empty.
pub fn resolve_session_id(session_id: Option<String>) -> String {
    match session_id {
        Some(id) if !id.is_empty() => id,
        _ => Uuid::now_v7().to_string(),
    }
}
