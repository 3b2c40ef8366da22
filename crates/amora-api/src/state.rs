//! Application state wiring all services together.
//!
//! `ChatService` is generic over its repository/gateway/engine traits;
//! AppState pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use amora_core::chat::service::ChatService;
use amora_infra::config::{data_dir, load_config};
use amora_infra::llm::AnthropicGateway;
use amora_infra::recommend::CatalogRecommendationEngine;
use amora_infra::sqlite::chat::SqliteChatRepository;
use amora_infra::sqlite::pool::DatabasePool;
use amora_infra::sqlite::recommendation::SqliteRecommendationRepository;
use amora_infra::sqlite::user_context::SqliteUserContextRepository;
use amora_types::config::AppConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<
    SqliteChatRepository,
    SqliteUserContextRepository,
    SqliteRecommendationRepository,
    AnthropicGateway,
    CatalogRecommendationEngine<SqliteRecommendationRepository>,
>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    /// Separate repository handle for catalog maintenance (seeding).
    pub recommendation_repo: Arc<SqliteRecommendationRepository>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("amora.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let api_key = std::env::var(&config.llm.api_key_env).map_err(|_| {
            anyhow::anyhow!(
                "missing Anthropic API key: set the {} environment variable",
                config.llm.api_key_env
            )
        })?;
        let mut gateway =
            AnthropicGateway::new(SecretString::from(api_key), config.llm.model.clone());
        if let Some(base_url) = &config.llm.base_url {
            gateway = gateway.with_base_url(base_url.clone());
        }

        let engine = CatalogRecommendationEngine::new(SqliteRecommendationRepository::new(
            db_pool.clone(),
        ));

        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteUserContextRepository::new(db_pool.clone()),
            SqliteRecommendationRepository::new(db_pool.clone()),
            gateway,
            engine,
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            recommendation_repo: Arc::new(SqliteRecommendationRepository::new(db_pool.clone())),
            config,
            data_dir,
            db_pool,
        })
    }
}
