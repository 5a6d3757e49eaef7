//! Business logic and port trait definitions for chatrelay.
//!
//! This crate defines the "ports" (store and provider traits) that the
//! infrastructure layer implements, plus the chat pipeline that sequences
//! them. It depends only on `chatrelay-types`, never on `chatrelay-infra`
//! or any database/IO crate.

pub mod chat;
pub mod llm;
