//! Pixabay photo and video search.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::{MediaSearchError, Result};
use crate::limiter::{default_limiter, DirectRateLimiter};
use crate::types::{MediaSource, StockPhoto, StockVideo};

const PHOTO_SEARCH_URL: &str = "https://pixabay.com/api/";
const VIDEO_SEARCH_URL: &str = "https://pixabay.com/api/videos/";

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    hits: Vec<PixabayPhoto>,
}

#[derive(Debug, Deserialize)]
struct PixabayPhoto {
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "pageURL")]
    page_url: String,
    #[serde(rename = "imageWidth")]
    image_width: u32,
    #[serde(rename = "imageHeight")]
    image_height: u32,
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    hits: Vec<PixabayVideo>,
}

#[derive(Debug, Deserialize)]
struct PixabayVideo {
    id: u64,
    #[serde(rename = "pageURL")]
    page_url: String,
    duration: Option<f64>,
    videos: VideoVariants,
}

#[derive(Debug, Deserialize)]
struct VideoVariants {
    large: Option<VideoVariant>,
    medium: Option<VideoVariant>,
}

#[derive(Debug, Deserialize)]
struct VideoVariant {
    url: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

pub struct PixabayClient {
    client: reqwest::Client,
    api_key: String,
    limiter: Arc<DirectRateLimiter>,
}

impl PixabayClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            limiter: default_limiter(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        if self.api_key.is_empty() {
            return Err(MediaSearchError::Config("Pixabay API key not set".into()));
        }

        self.limiter.until_ready().await;
        tracing::debug!(url, "Pixabay request");

        let resp = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
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

        Ok(resp.json().await?)
    }

    /// Search photos, returning up to `per_page` normalized results.
    pub async fn search_photos(&self, query: &str, per_page: u32) -> Result<Vec<StockPhoto>> {
        let per_page = per_page.to_string();
        let response: PhotoSearchResponse = self
            .get_json(
                PHOTO_SEARCH_URL,
                &[("q", query), ("per_page", &per_page), ("image_type", "photo")],
            )
            .await?;

        let photos = response
            .hits
            .into_iter()
            .map(|p| StockPhoto {
                source: MediaSource::Pixabay,
                source_id: p.id.to_string(),
                download_url: p.webformat_url,
                page_url: p.page_url,
                width: p.image_width,
                height: p.image_height,
            })
            .collect();

        Ok(photos)
    }

    /// Search videos. Prefers the `large` rendition, then `medium`.
    pub async fn search_videos(&self, query: &str, per_page: u32) -> Result<Vec<StockVideo>> {
        let per_page = per_page.to_string();
        let response: VideoSearchResponse = self
            .get_json(
                VIDEO_SEARCH_URL,
                &[("q", query), ("per_page", &per_page), ("video_type", "film")],
            )
            .await?;

        let videos = response
            .hits
            .into_iter()
            .filter_map(|v| {
                let variant = v.videos.large.or(v.videos.medium)?;
                Some(StockVideo {
                    source: MediaSource::Pixabay,
                    source_id: v.id.to_string(),
                    download_url: variant.url,
                    page_url: v.page_url,
                    width: variant.width,
                    height: variant.height,
                    duration_secs: v.duration,
                })
            })
            .collect();

        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_video_hit_and_prefers_large() {
        let json = r#"{
            "total": 1,
            "hits": [{
                "id": 9876,
                "pageURL": "https://pixabay.com/videos/id-9876/",
                "duration": 12.0,
                "videos": {
                    "large": {"url": "https://cdn.pixabay.com/l.mp4", "width": 1920, "height": 1080},
                    "medium": {"url": "https://cdn.pixabay.com/m.mp4", "width": 1280, "height": 720}
                }
            }]
        }"#;

        let resp: VideoSearchResponse = serde_json::from_str(json).unwrap();
        let variant = resp.hits[0].videos.large.as_ref().unwrap();
        assert_eq!(variant.url, "https://cdn.pixabay.com/l.mp4");
    }

    #[test]
    fn video_without_variants_is_skipped() {
        let json = r#"{
            "hits": [{
                "id": 1,
                "pageURL": "https://pixabay.com/videos/id-1/",
                "duration": 5.0,
                "videos": {"large": null, "medium": null}
            }]
        }"#;

        let resp: VideoSearchResponse = serde_json::from_str(json).unwrap();
        let hit = &resp.hits[0];
        assert!(hit.videos.large.is_none() && hit.videos.medium.is_none());
    }
}
