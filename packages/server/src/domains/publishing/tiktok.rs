//! TikTok publishing via the Content Posting API.
//!
//! Uses direct post with PULL_FROM_URL: TikTok fetches the video itself,
//! so the source URL must be publicly reachable. Returns the publish id
//! TikTok assigns to track the upload.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const INIT_URL: &str = "https://open.tiktokapis.com/v2/post/publish/video/init/";

#[derive(Debug, Serialize)]
struct InitRequest<'a> {
    post_info: PostInfo<'a>,
    source_info: SourceInfo<'a>,
}

#[derive(Debug, Serialize)]
struct PostInfo<'a> {
    title: &'a str,
    privacy_level: &'a str,
}

#[derive(Debug, Serialize)]
struct SourceInfo<'a> {
    source: &'a str,
    video_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct InitResponse {
    data: InitData,
    error: TikTokError,
}

#[derive(Debug, Deserialize, Default)]
struct InitData {
    #[serde(default)]
    publish_id: String,
}

#[derive(Debug, Deserialize)]
struct TikTokError {
    code: String,
    message: String,
}

pub struct TikTokPublisher {
    client: reqwest::Client,
    access_token: String,
}

impl TikTokPublisher {
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
        }
    }

    /// Start a direct video post from a public URL.
    /// Returns the publish id.
    pub async fn publish_video(&self, video_url: &str, title: &str) -> Result<String> {
        let request = InitRequest {
            post_info: PostInfo {
                title,
                privacy_level: "PUBLIC_TO_EVERYONE",
            },
            source_info: SourceInfo {
                source: "PULL_FROM_URL",
                video_url,
            },
        };

        let resp = self
            .client
            .post(INIT_URL)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .context("TikTok init request failed")?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("TikTok API error ({}): {}", status.as_u16(), body);
        }

        let parsed: InitResponse =
            serde_json::from_str(&body).context("TikTok init response malformed")?;
        if parsed.error.code != "ok" {
            bail!(
                "TikTok rejected post ({}): {}",
                parsed.error.code,
                parsed.error.message
            );
        }

        Ok(parsed.data.publish_id)
    }
}
