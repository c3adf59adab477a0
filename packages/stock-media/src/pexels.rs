//! Pexels photo and video search.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::{MediaSearchError, Result};
use crate::limiter::{default_limiter, DirectRateLimiter};
use crate::types::{MediaSource, StockPhoto, StockVideo};

const PHOTO_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const VIDEO_SEARCH_URL: &str = "https://api.pexels.com/videos/search";

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    width: u32,
    height: u32,
    url: String,
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    medium: String,
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    url: String,
    duration: Option<f64>,
    #[serde(default)]
    video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoFile {
    pub link: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Pick the best downloadable file: the smallest one that is at least
/// 720px in both dimensions, falling back to the smallest file overall.
pub(crate) fn pick_video_file(files: &[VideoFile]) -> Option<&VideoFile> {
    let suitable: Vec<&VideoFile> = files
        .iter()
        .filter(|f| f.width >= 720 && f.height >= 720)
        .collect();

    let candidates: Vec<&VideoFile> = if suitable.is_empty() {
        files.iter().collect()
    } else {
        suitable
    };

    candidates
        .into_iter()
        .min_by_key(|f| u64::from(f.width) * u64::from(f.height))
}

pub struct PexelsClient {
    client: reqwest::Client,
    api_key: String,
    limiter: Arc<DirectRateLimiter>,
}

impl PexelsClient {
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
            return Err(MediaSearchError::Config("Pexels API key not set".into()));
        }

        self.limiter.until_ready().await;
        tracing::debug!(url, "Pexels request");

        let resp = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
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
                &[("query", query), ("per_page", &per_page), ("size", "medium")],
            )
            .await?;

        let photos = response
            .photos
            .into_iter()
            .map(|p| StockPhoto {
                source: MediaSource::Pexels,
                source_id: p.id.to_string(),
                download_url: p.src.medium,
                page_url: p.url,
                width: p.width,
                height: p.height,
            })
            .collect();

        Ok(photos)
    }

    /// Search videos (portrait-oriented for vertical platforms).
    pub async fn search_videos(&self, query: &str, per_page: u32) -> Result<Vec<StockVideo>> {
        let per_page = per_page.to_string();
        let response: VideoSearchResponse = self
            .get_json(
                VIDEO_SEARCH_URL,
                &[
                    ("query", query),
                    ("per_page", &per_page),
                    ("size", "medium"),
                    ("orientation", "portrait"),
                ],
            )
            .await?;

        let videos = response
            .videos
            .into_iter()
            .filter_map(|v| {
                let file = pick_video_file(&v.video_files)?;
                Some(StockVideo {
                    source: MediaSource::Pexels,
                    source_id: v.id.to_string(),
                    download_url: file.link.clone(),
                    page_url: v.url.clone(),
                    width: file.width,
                    height: file.height,
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
    fn picks_smallest_hd_file() {
        let files = vec![
            VideoFile {
                link: "a".into(),
                width: 640,
                height: 360,
            },
            VideoFile {
                link: "b".into(),
                width: 1920,
                height: 1080,
            },
            VideoFile {
                link: "c".into(),
                width: 1280,
                height: 720,
            },
        ];

        let best = pick_video_file(&files).unwrap();
        assert_eq!(best.link, "c");
    }

    #[test]
    fn falls_back_to_smallest_when_no_hd() {
        let files = vec![
            VideoFile {
                link: "a".into(),
                width: 640,
                height: 360,
            },
            VideoFile {
                link: "b".into(),
                width: 426,
                height: 240,
            },
        ];

        let best = pick_video_file(&files).unwrap();
        assert_eq!(best.link, "b");
    }

    #[test]
    fn empty_files_yield_none() {
        assert!(pick_video_file(&[]).is_none());
    }

    #[test]
    fn deserializes_photo_search_response() {
        let json = r#"{
            "total_results": 1,
            "photos": [{
                "id": 12345,
                "width": 4000,
                "height": 6000,
                "url": "https://www.pexels.com/photo/12345/",
                "src": {"medium": "https://images.pexels.com/12345/medium.jpg"}
            }]
        }"#;
        let resp: PhotoSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.photos.len(), 1);
        assert_eq!(resp.photos[0].id, 12345);
    }
}
