use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,

    // Reddit scraping
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub subreddits: Vec<String>,
    pub min_upvotes: i64,
    pub post_limit: u32,
    pub time_filter: String,

    // Caption generation
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: Option<String>,

    // Stock media providers
    pub unsplash_access_key: Option<String>,
    pub pexels_api_key: Option<String>,
    pub pixabay_api_key: Option<String>,
    pub media_dir: String,
    pub fallback_image_path: Option<String>,

    // Publishing
    pub instagram_access_token: Option<String>,
    pub instagram_business_account_id: Option<String>,
    pub tiktok_access_token: Option<String>,
    pub auto_publish: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            reddit_client_id: env::var("REDDIT_CLIENT_ID")
                .context("REDDIT_CLIENT_ID must be set")?,
            reddit_client_secret: env::var("REDDIT_CLIENT_SECRET")
                .context("REDDIT_CLIENT_SECRET must be set")?,
            reddit_user_agent: env::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| "content-pipeline/0.1".to_string()),
            subreddits: env::var("REDDIT_SUBREDDITS")
                .unwrap_or_else(|_| "todayilearned".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            min_upvotes: env::var("REDDIT_MIN_UPVOTES")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("REDDIT_MIN_UPVOTES must be a valid number")?,
            post_limit: env::var("REDDIT_POST_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .context("REDDIT_POST_LIMIT must be a valid number")?,
            time_filter: env::var("REDDIT_TIME_FILTER").unwrap_or_else(|_| "day".to_string()),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            anthropic_model: env::var("ANTHROPIC_MODEL").ok(),
            unsplash_access_key: env::var("UNSPLASH_ACCESS_KEY").ok(),
            pexels_api_key: env::var("PEXELS_API_KEY").ok(),
            pixabay_api_key: env::var("PIXABAY_API_KEY").ok(),
            media_dir: env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_string()),
            fallback_image_path: env::var("FALLBACK_IMAGE_PATH").ok(),
            instagram_access_token: env::var("INSTAGRAM_ACCESS_TOKEN").ok(),
            instagram_business_account_id: env::var("INSTAGRAM_BUSINESS_ACCOUNT_ID").ok(),
            tiktok_access_token: env::var("TIKTOK_ACCESS_TOKEN").ok(),
            auto_publish: env::var("AUTO_PUBLISH")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
