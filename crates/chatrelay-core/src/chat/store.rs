//! ConversationStore trait definition.
//!
//! The store is an append-only log of turns keyed by session id. There is no
//! update or delete: a stored message is immutable.

use chatrelay_types::conversation::{Role, StoredMessage};
use chatrelay_types::error::RepositoryError;

/// Repository trait for conversation persistence.
///
/// Implementations live in chatrelay-infra (e.g., `SqliteConversationStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationStore: Send + Sync {
    /// Ensure the backing table and its session index exist.
    ///
    /// Must be safe to call any number of times.
    fn initialize(
        &self,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append one turn to a session. The store assigns `id` and `created_at`.
    fn append(
        &self,
        session_id: &str,
        role: Role,
        content: &str,
    ) -> impl std::future::Future<Output = Result<StoredMessage, RepositoryError>> + Send;

    /// Read every turn of a session, ordered by created_at ASC then id ASC.
    ///
    /// An unknown session yields an empty vector, not an error.
    fn read(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, RepositoryError>> + Send;

    /// Every distinct session id ever written, sorted.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}
