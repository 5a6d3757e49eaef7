//! Configuration types for chatrelay.
//!
//! `RelayConfig` is built once at startup (defaults, then `config.toml`,
//! then environment) and handed by reference to the store and provider
//! constructors. Nothing reads the process environment after that.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Connection string for the conversation store.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Completion service connection parameters.
    #[serde(default)]
    pub llm: LlmConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_database_url() -> String {
    "sqlite://chatrelay.db?mode=rwc".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Connection parameters for the OpenAI-compatible completion service.
///
/// `Debug` is implemented by hand so the API key never reaches logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on a single completion call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8023/".to_string()
}

fn default_model() -> String {
    "ollama/qwen3:0.6b".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("LlmConfig")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding a built front-end. Served for unknown paths when set.
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: None,
        }
    }
}
