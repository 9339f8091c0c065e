use std::sync::Arc;

use studio_events::InvalidationBus;
use studio_integrations::{
    BackgroundRemover, BunnyStorage, ClaidClient, DeepSeekClient, Fetcher, HttpFetcher,
    IntegrationsConfig, ObjectStorage, ScreenshotOneClient, ScreenshotProvider, TextGenerator,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: studio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cache-invalidation bus; every successful write publishes here.
    pub event_bus: Arc<InvalidationBus>,
    /// External service clients.
    pub integrations: Integrations,
}

/// External service clients behind their traits, so tests can swap in fakes.
#[derive(Clone)]
pub struct Integrations {
    pub storage: Arc<dyn ObjectStorage>,
    pub text: Arc<dyn TextGenerator>,
    pub background: Arc<dyn BackgroundRemover>,
    pub screenshots: Arc<dyn ScreenshotProvider>,
    pub fetcher: Arc<dyn Fetcher>,
}

impl Integrations {
    /// Build the production clients. Services without credentials are still
    /// constructed and report "not configured" when called.
    pub fn from_config(config: &IntegrationsConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            storage: Arc::new(BunnyStorage::new(client.clone(), config.bunny.clone())),
            text: Arc::new(DeepSeekClient::new(
                client.clone(),
                &config.deepseek_base_url,
                config.deepseek_api_key.clone(),
            )),
            background: Arc::new(ClaidClient::new(client.clone(), config.claid_api_key.clone())),
            screenshots: Arc::new(ScreenshotOneClient::new(
                client.clone(),
                config.screenshot_access_key.clone(),
            )),
            fetcher: Arc::new(HttpFetcher::new(client)),
        }
    }
}
