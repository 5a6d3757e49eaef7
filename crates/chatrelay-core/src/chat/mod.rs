//! Conversation persistence abstractions and the chat pipeline.
//!
//! - `store`: the `ConversationStore` port implemented by the infra layer
//! - `prompt`: fixed system preamble and completion message assembly
//! - `completion`: `CompletionClient`, one completion call per user turn
//! - `service`: `ChatService`, the per-request orchestrator

pub mod completion;
pub mod prompt;
pub mod service;
pub mod store;
