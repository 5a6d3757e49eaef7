//! Shared domain types for chatrelay.
//!
//! This crate contains the types used across the relay: stored conversation
//! messages, LLM request/response shapes, configuration, and their error types.
//!
//! Zero infrastructure dependencies: only serde, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
