//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP
//! API. `ChatService` is generic over the store trait; AppState pins it to
//! the SQLite implementation.

use std::sync::Arc;

use chatrelay_core::chat::completion::CompletionClient;
use chatrelay_core::chat::service::ChatService;
use chatrelay_core::chat::store::ConversationStore;
use chatrelay_core::llm::box_provider::BoxLlmProvider;
use chatrelay_infra::llm::create_provider;
use chatrelay_infra::sqlite::conversation::SqliteConversationStore;
use chatrelay_infra::sqlite::pool::DatabasePool;
use chatrelay_types::config::RelayConfig;

/// Concrete type alias for the chat service pinned to the SQLite store.
pub type ConcreteChatService = ChatService<SqliteConversationStore>;

/// Shared application state.
///
/// Cloned into every request handler; all fields are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Initialize the application state: connect to DB, ensure the schema,
    /// build the completion provider from `config.llm`.
    pub async fn init(config: RelayConfig) -> anyhow::Result<Self> {
        let provider = create_provider(&config.llm);
        Self::with_provider(config, provider).await
    }

    /// Same as [`AppState::init`] with an explicit completion provider.
    pub async fn with_provider(
        config: RelayConfig,
        provider: BoxLlmProvider,
    ) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;

        let store = SqliteConversationStore::new(db_pool);
        store.initialize().await?;

        let completion = CompletionClient::new(provider, config.llm.model.clone());
        tracing::debug!(
            provider = completion.provider_name(),
            model = %config.llm.model,
            "Completion client ready"
        );

        Ok(Self {
            chat_service: Arc::new(ChatService::new(store, completion)),
            config: Arc::new(config),
        })
    }
}
