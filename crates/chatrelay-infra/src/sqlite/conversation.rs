//! SQLite conversation store implementation.
//!
//! Implements `ConversationStore` from `chatrelay-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, writes on the writer
//! pool and reads on the reader pool.

use chatrelay_core::chat::store::ConversationStore;
use chatrelay_types::conversation::{Role, StoredMessage};
use chatrelay_types::error::RepositoryError;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::Row;
use tracing::debug;

use super::pool::DatabasePool;

const CREATE_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS conversations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    role TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)"#;

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_session_id ON conversations(session_id)";

/// SQLite-backed implementation of `ConversationStore`.
pub struct SqliteConversationStore {
    pool: DatabasePool,
}

impl SqliteConversationStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: i64,
    session_id: String,
    role: String,
    message: String,
    created_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<StoredMessage, RepositoryError> {
        Ok(StoredMessage {
            id: self.id,
            session_id: self.session_id,
            role: self.role,
            content: self.message,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a stored timestamp.
///
/// Rows written by this store are RFC 3339. Rows written by other tools via
/// `CURRENT_TIMESTAMP` use `YYYY-MM-DD HH:MM:SS` in UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Query(format!("invalid datetime '{s}': {e}")))
}

/// RFC 3339 with microseconds, UTC.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Configuration(_) => RepositoryError::Connection(e.to_string()),
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ConversationStore implementation
// ---------------------------------------------------------------------------

impl ConversationStore for SqliteConversationStore {
    async fn initialize(&self) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(CREATE_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query(CREATE_INDEX)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!("Conversation schema ready");
        Ok(())
    }

    async fn append(
        &self,
        session_id: &str,
        role: Role,
        content: &str,
    ) -> Result<StoredMessage, RepositoryError> {
        // Stored at microsecond precision; return exactly what a read yields.
        let created_at_text = format_datetime(&Utc::now());
        let created_at = parse_datetime(&created_at_text)?;

        let result = sqlx::query(
            "INSERT INTO conversations (session_id, role, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(role.to_string())
        .bind(content)
        .bind(created_at_text.as_str())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(StoredMessage {
            id: result.last_insert_rowid(),
            session_id: session_id.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            created_at,
        })
    }

    async fn read(&self, session_id: &str) -> Result<Vec<StoredMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, session_id, role, message, created_at FROM conversations \
             WHERE session_id = ? ORDER BY julianday(created_at) ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let conversation_row = ConversationRow::from_row(row).map_err(map_sqlx_error)?;
            messages.push(conversation_row.into_message()?);
        }

        Ok(messages)
    }

    async fn list_sessions(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT DISTINCT session_id FROM conversations ORDER BY session_id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("session_id").map_err(map_sqlx_error))
            .collect()
    }
}
