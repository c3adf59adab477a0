//! Unsplash photo search.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::{MediaSearchError, Result};
use crate::limiter::{default_limiter, DirectRateLimiter};
use crate::types::{MediaSource, StockPhoto};

const PHOTO_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    width: u32,
    height: u32,
    urls: PhotoUrls,
    links: PhotoLinks,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: String,
}

pub struct UnsplashClient {
    client: reqwest::Client,
    access_key: String,
    limiter: Arc<DirectRateLimiter>,
}

impl UnsplashClient {
    pub fn new(access_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_key,
            limiter: default_limiter(),
        }
    }

    /// Search square-oriented photos, returning up to `per_page` results.
    pub async fn search_photos(&self, query: &str, per_page: u32) -> Result<Vec<StockPhoto>> {
        if self.access_key.is_empty() {
            return Err(MediaSearchError::Config(
                "Unsplash access key not set".into(),
            ));
        }

        self.limiter.until_ready().await;
        tracing::debug!(query, "Unsplash photo search");

        let per_page = per_page.to_string();
        let resp = self
            .client
            .get(PHOTO_SEARCH_URL)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Client-ID {}", self.access_key),
            )
            .query(&[
                ("query", query),
                ("per_page", &per_page),
                ("orientation", "squarish"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MediaSearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let response: PhotoSearchResponse = resp.json().await?;

        let photos = response
            .results
            .into_iter()
            .map(|p| StockPhoto {
                source: MediaSource::Unsplash,
                source_id: p.id,
                download_url: p.urls.regular,
                page_url: p.links.html,
                width: p.width,
                height: p.height,
            })
            .collect();

        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_response() {
        let json = r#"{
            "total": 1,
            "results": [{
                "id": "abc123",
                "width": 3000,
                "height": 3000,
                "urls": {"regular": "https://images.unsplash.com/abc123?w=1080"},
                "links": {"html": "https://unsplash.com/photos/abc123"}
            }]
        }"#;

        let resp: PhotoSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].id, "abc123");
        assert!(resp.results[0].urls.regular.contains("unsplash"));
    }
}
