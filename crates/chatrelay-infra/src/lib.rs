//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the port traits defined in `chatrelay-core`:
//! SQLite conversation storage, the OpenAI-compatible completion provider,
//! and the configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
