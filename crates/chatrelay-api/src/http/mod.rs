//! HTTP API layer for chatrelay.
//!
//! Axum-based JSON API with CORS open to every origin and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
