//! Logging setup shared by the chatrelay binary.

pub mod tracing_setup;
