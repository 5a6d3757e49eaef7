//! Configuration for the OpenAI-compatible provider.
//!
//! Built from the `[llm]` section of [`RelayConfig`](chatrelay_types::config::RelayConfig).

use std::time::Duration;

use chatrelay_types::config::LlmConfig;
use secrecy::SecretString;

/// Provider name reported in logs and spans.
pub const PROVIDER_NAME: &str = "openai_compatible";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name.
    pub provider_name: String,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    /// API key for authentication. May be empty for local gateways.
    pub api_key: SecretString,
    /// Default model identifier (e.g., "ollama/qwen3:0.6b").
    pub model: String,
    /// Upper bound on one completion call.
    pub request_timeout: Duration,
}

impl OpenAiCompatConfig {
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        Self {
            provider_name: PROVIDER_NAME.to_string(),
            base_url: normalize_base_url(&config.base_url),
            api_key: SecretString::from(config.api_key.clone()),
            model: config.model.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Strip trailing slashes; the client appends `/chat/completions` itself.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
