//! Conversation message types for chatrelay.
//!
//! A conversation is an append-only log of turns grouped by an opaque
//! session identifier. There is no session entity: a session exists as soon
//! as its first message is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::llm::MessageRole;

/// Author of a persisted turn.
///
/// Only these two roles are ever written. The system preamble is synthesized
/// when a completion request is built and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid conversation role: '{other}'")),
        }
    }
}

impl From<Role> for MessageRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single stored turn, as read back from the conversation log.
///
/// `role` holds the stored text verbatim. Rows written by other tools may
/// carry roles outside [`Role`]; use [`StoredMessage::known_role`] to tell
/// them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Auto-incrementing row identity. Breaks ties between equal timestamps.
    pub id: i64,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    /// The role as a [`Role`], or `None` if the stored text is not one we write.
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Result of one pass through the chat pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}
