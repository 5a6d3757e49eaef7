//! CompletionClient: one upstream completion per user turn.

use chatrelay_types::conversation::StoredMessage;
use chatrelay_types::llm::{CompletionRequest, LlmError};
use tracing::{Instrument, info_span};

use crate::chat::prompt::build_messages;
use crate::llm::box_provider::BoxLlmProvider;

/// Sampling temperature for every completion request.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Wraps a provider with the model and sampling settings used for chat.
///
/// Holds no mutable state, so one instance is shared by every request.
pub struct CompletionClient {
    provider: BoxLlmProvider,
    model: String,
    temperature: f64,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Name of the wrapped provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate the assistant's next turn.
    ///
    /// Builds the request from the fixed preamble, `history` and
    /// `user_message`, calls the provider once and returns the reply text.
    /// A blank reply is an upstream failure.
    pub async fn complete(
        &self,
        user_message: &str,
        history: &[StoredMessage],
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: build_messages(user_message, history),
            temperature: Some(self.temperature),
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.messages = request.messages.len(),
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(response.content)
    }
}
