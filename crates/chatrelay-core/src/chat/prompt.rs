//! Completion message assembly.
//!
//! Every request sent upstream has the same shape:
//!
//! ```text
//! system    SYSTEM_PROMPT
//! user      history[0]
//! assistant history[1]
//! ...
//! user      the new message
//! ```

use chatrelay_types::conversation::{Role, StoredMessage};
use chatrelay_types::llm::Message;
use tracing::debug;

/// Fixed persona prepended to every completion request. Never stored.
pub const SYSTEM_PROMPT: &str = "Sen yardımcı bir asistansın. Kullanıcının sorularına \
Türkçe olarak, samimi ve anlaşılır bir şekilde cevap ver. \
Kısa ve öz cevaplar vermeye çalış.";

/// Build the ordered message list for one completion call.
///
/// History rows whose role is not `user` or `assistant` are skipped.
pub fn build_messages(user_message: &str, history: &[StoredMessage]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(SYSTEM_PROMPT));

    for stored in history {
        match stored.known_role() {
            Some(Role::User) => messages.push(Message::user(stored.content.clone())),
            Some(Role::Assistant) => messages.push(Message::assistant(stored.content.clone())),
            None => {
                debug!(
                    session_id = %stored.session_id,
                    message_id = stored.id,
                    role = %stored.role,
                    "Skipping history message with unsupported role"
                );
            }
        }
    }

    messages.push(Message::user(user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::llm::MessageRole;
    use chrono::Utc;

    fn stored(id: i64, role: &str, content: &str) -> StoredMessage {
        StoredMessage {
            id,
            session_id: "s-1".to_string(),
            role: role.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_history() {
        let messages = build_messages("Merhaba", &[]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1], Message::user("Merhaba"));
    }

    #[test]
    fn test_history_keeps_order() {
        let history = vec![
            stored(1, "user", "Merhaba"),
            stored(2, "assistant", "Merhaba! Nasıl yardımcı olabilirim?"),
        ];
        let messages = build_messages("Hava nasıl?", &history);

        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert_eq!(messages[1].content, "Merhaba");
        assert_eq!(messages[3].content, "Hava nasıl?");
    }

    #[test]
    fn test_unknown_roles_are_dropped() {
        let history = vec![
            stored(1, "user", "a"),
            stored(2, "system", "injected"),
            stored(3, "tool", "result"),
            stored(4, "assistant", "b"),
        ];
        let messages = build_messages("c", &history);

        assert_eq!(messages.len(), 4);
        assert!(messages.iter().all(|m| m.content != "injected"));
        assert!(messages.iter().all(|m| m.content != "result"));
        // Only the preamble carries the system role.
        assert_eq!(
            messages.iter().filter(|m| m.role == MessageRole::System).count(),
            1
        );
    }
}
