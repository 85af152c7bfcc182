//! Chatgate - provider-agnostic AI chat gateway
//!
//! This library provides the core of the Chatgate service: it accepts chat
//! conversations from a web front-end, forwards them to a configured
//! language-model provider and returns a normalized reply. Provider
//! credentials stay on the server. A keyed video search proxy shares the
//! process.

pub mod config;
pub mod error;
pub mod gateway;
pub mod proxy;
pub mod routes;
pub mod search;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::gateway::{ChatRequest, ChatTurn, Gateway, GatewayResult, Outcome};
pub use crate::proxy::{OpenAICompatibleTransport, ProviderTransport};
pub use crate::search::YouTubeClient;

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Gateway to the upstream model provider
    pub gateway: Arc<Gateway>,
    /// Video search client
    pub youtube: Arc<YouTubeClient>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling; request timeouts are
        // left at the client default
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let transport: Arc<dyn ProviderTransport> =
            Arc::new(OpenAICompatibleTransport::new(http_client.clone()));

        Ok(Self::with_transport(config, http_client, transport))
    }

    /// Create application state around a specific provider transport
    pub fn with_transport(
        config: Config,
        http_client: reqwest::Client,
        transport: Arc<dyn ProviderTransport>,
    ) -> Self {
        // Misconfiguration is logged here, once, and then reported per request
        let gateway = Arc::new(Gateway::from_config(&config, transport));
        let youtube = Arc::new(YouTubeClient::new(http_client, &config));

        Self {
            config,
            start_time: Instant::now(),
            gateway,
            youtube,
        }
    }
}
