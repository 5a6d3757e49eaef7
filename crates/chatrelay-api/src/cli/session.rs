//! Session inspection CLI commands: list sessions, show history.
//!
//! Rich tables by default, JSON with `--json`.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::{Value, json};

use chatrelay_types::conversation::StoredMessage;

use crate::state::AppState;

/// Longest message preview shown in the history table.
const PREVIEW_CHARS: usize = 80;

/// Print every distinct session id.
///
/// # Examples
///
/// ```bash
/// chatrelay sessions
/// chatrelay sessions --json
/// ```
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let sessions = state.chat_service.list_sessions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start one with: {}",
            style("i").blue().bold(),
            style("POST /chat").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Session").fg(Color::White)]);

    for session_id in &sessions {
        table.add_row(vec![Cell::new(session_id).fg(Color::Cyan)]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print a session's stored messages, oldest first.
///
/// # Examples
///
/// ```bash
/// chatrelay history <session-id>
/// chatrelay history <session-id> --json
/// ```
pub async fn show_history(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    let messages = state.chat_service.history(session_id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&history_json(session_id, &messages))?
        );
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages for session '{}'",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for message in &messages {
        let role_cell = match message.role.as_str() {
            "user" => Cell::new("user").fg(Color::Green),
            "assistant" => Cell::new("assistant").fg(Color::Cyan),
            other => Cell::new(other).fg(Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(message.created_at.format("%Y-%m-%d %H:%M:%S").to_string())
                .fg(Color::DarkGrey),
            role_cell,
            Cell::new(preview(&message.content)),
        ]);
    }

    println!();
    println!("  Session '{}'", style(session_id).cyan().bold());
    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// `--json` shape of `history`, matching `GET /history/{session_id}`.
fn history_json(session_id: &str, messages: &[StoredMessage]) -> Value {
    json!({
        "session_id": session_id,
        "messages": messages
            .iter()
            .map(|m| json!({
                "role": m.role,
                "content": m.content,
                "created_at": m.created_at,
            }))
            .collect::<Vec<_>>(),
    })
}

/// First line of `content`, truncated on a char boundary.
fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let truncated: String = first_line.chars().take(PREVIEW_CHARS).collect();
    let more_lines = content.trim_end().contains('\n');
    if more_lines || first_line.chars().count() > PREVIEW_CHARS {
        format!("{truncated}...")
    } else {
        truncated
    }
}
