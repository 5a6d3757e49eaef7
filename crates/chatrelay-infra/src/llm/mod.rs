//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `chatrelay-core`, plus [`create_provider`] which builds it from the
//! relay configuration.
//!
//! [`LlmProvider`]: chatrelay_core::llm::provider::LlmProvider

pub mod openai_compat;

use chatrelay_core::llm::box_provider::BoxLlmProvider;
use chatrelay_types::config::LlmConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from the `[llm]` configuration section.
pub fn create_provider(config: &LlmConfig) -> BoxLlmProvider {
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_llm_config(config));
    BoxLlmProvider::new(provider)
}
