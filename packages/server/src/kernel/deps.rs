//! Pipeline dependencies (using traits for testability)
//!
//! Central dependency container handed to each pipeline stage. External
//! services sit behind trait objects or optional clients so stages degrade
//! gracefully when a provider is not configured.

use sqlx::PgPool;
use std::sync::Arc;

use reddit_client::RedditClient;
use stock_media::{PexelsClient, PixabayClient, UnsplashClient};

use crate::config::Config;
use crate::kernel::{AnthropicAI, BaseAI};

/// Dependencies accessible to pipeline stages
pub struct PipelineDeps {
    pub db_pool: PgPool,
    pub config: Config,
    pub reddit: RedditClient,
    /// None when no Anthropic key is configured; stages fall back to
    /// deterministic generation.
    pub ai: Option<Arc<dyn BaseAI>>,
    pub unsplash: Option<UnsplashClient>,
    pub pexels: Option<PexelsClient>,
    pub pixabay: Option<PixabayClient>,
}

impl PipelineDeps {
    pub fn new(db_pool: PgPool, config: Config) -> Self {
        let reddit = RedditClient::new(
            config.reddit_client_id.clone(),
            config.reddit_client_secret.clone(),
            config.reddit_user_agent.clone(),
        );

        let ai: Option<Arc<dyn BaseAI>> = config.anthropic_api_key.clone().map(|key| {
            Arc::new(AnthropicAI::new(key, config.anthropic_model.clone())) as Arc<dyn BaseAI>
        });

        let unsplash = config
            .unsplash_access_key
            .clone()
            .map(UnsplashClient::new);
        let pexels = config.pexels_api_key.clone().map(PexelsClient::new);
        let pixabay = config.pixabay_api_key.clone().map(PixabayClient::new);

        Self {
            db_pool,
            config,
            reddit,
            ai,
            unsplash,
            pexels,
            pixabay,
        }
    }
}
