//! Pure Reddit REST API client.
//!
//! A minimal client for the Reddit API using OAuth2 client-credentials.
//! Supports fetching `top` listings from subreddits.
//!
//! # Example
//!
//! ```rust,ignore
//! use reddit_client::{RedditClient, TimeFilter};
//!
//! let client = RedditClient::new(client_id, client_secret, "content-machine/1.0".into());
//!
//! let posts = client.top_posts("todayilearned", TimeFilter::Day, 50).await?;
//! for post in &posts {
//!     println!("{} ({} upvotes)", post.title, post.score);
//! }
//! ```

pub mod error;
mod limiter;
pub mod types;

pub use error::{RedditError, Result};
pub use types::{AccessToken, Listing, Post, TimeFilter};

use limiter::{default_limiter, DirectRateLimiter};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE_URL: &str = "https://oauth.reddit.com";

/// Refresh the token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    token: String,
    expires_at: Instant,
}

pub struct RedditClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    user_agent: String,
    token: Mutex<Option<CachedToken>>,
    limiter: Arc<DirectRateLimiter>,
}

impl RedditClient {
    pub fn new(client_id: String, client_secret: String, user_agent: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            user_agent,
            token: Mutex::new(None),
            limiter: default_limiter(),
        }
    }

    /// Get a bearer token, refreshing via the client-credentials grant when
    /// the cached one is missing or close to expiry.
    async fn bearer_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.token.clone());
            }
        }

        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(RedditError::Config(
                "Reddit client_id and client_secret must be set".into(),
            ));
        }

        self.limiter.until_ready().await;
        tracing::debug!("Requesting new Reddit access token");

        let resp = self
            .client
            .post(AUTH_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Auth(format!(
                "token request failed ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let token: AccessToken = resp.json().await?;
        let expires_at = Instant::now() + Duration::from_secs(token.expires_in)
            - TOKEN_EXPIRY_MARGIN;

        let bearer = token.access_token.clone();
        *guard = Some(CachedToken {
            token: token.access_token,
            expires_at,
        });

        Ok(bearer)
    }

    /// Fetch the top posts of a subreddit for the given time window.
    pub async fn top_posts(
        &self,
        subreddit: &str,
        time_filter: TimeFilter,
        limit: u32,
    ) -> Result<Vec<Post>> {
        let token = self.bearer_token().await?;

        let url = format!(
            "{}/r/{}/top?t={}&limit={}",
            API_BASE_URL,
            subreddit,
            time_filter.as_str(),
            limit.min(100)
        );

        self.limiter.until_ready().await;
        tracing::debug!(subreddit, limit, t = time_filter.as_str(), "Fetching top listing");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let listing: Listing = resp.json().await?;
        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data)
            .collect();

        tracing::info!(subreddit, count = posts.len(), "Fetched top posts");
        Ok(posts)
    }
}
