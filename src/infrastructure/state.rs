//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{AccountStorePort, ContentGeneratorPort};
use crate::application::services::{
    AccountService, DragonGenerationService, GameService, LeaderboardService, PersistenceQueue,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ollama::OllamaClient;
use crate::infrastructure::persistence::create_account_store;
use crate::infrastructure::session::SessionManager;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Logged-in players
    pub sessions: RwLock<SessionManager>,
    /// Ordered account saves, flushed on shutdown
    pub persistence: PersistenceQueue,
    // Application services
    pub account_service: AccountService,
    pub game_service: GameService,
    pub leaderboard_service: LeaderboardService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize account store
        let store = create_account_store(&config).await?;

        // Initialize Ollama client and the generator built on it
        let llm_client = OllamaClient::new(&config.ollama_base_url, &config.ollama_model);
        match llm_client.health_check().await {
            Ok(true) => tracing::info!("Ollama reachable at {}", config.ollama_base_url),
            Ok(false) | Err(_) => tracing::warn!(
                "Ollama not reachable at {}, generation will fail until it is",
                config.ollama_base_url
            ),
        }
        let generator = Arc::new(DragonGenerationService::new(llm_client));

        Ok(Self::with_components(config, store, generator))
    }

    /// Wire the services around an explicit store and generator
    pub fn with_components(
        config: AppConfig,
        store: Arc<dyn AccountStorePort>,
        generator: Arc<dyn ContentGeneratorPort>,
    ) -> Self {
        let (persistence, _worker) = PersistenceQueue::spawn(Arc::clone(&store));

        let account_service = AccountService::new(Arc::clone(&store), persistence.clone());
        let game_service = GameService::new(generator, persistence.clone(), config.pacing());
        let leaderboard_service = LeaderboardService::new(store, config.leaderboard_limit);

        Self {
            config,
            sessions: RwLock::new(SessionManager::new()),
            persistence,
            account_service,
            game_service,
            leaderboard_service,
        }
    }
}
