//! Instagram publishing via the Graph API container flow.
//!
//! Two steps: create a media container from a publicly reachable URL plus
//! the caption, then publish the container. Both need a long-lived access
//! token for an Instagram business account.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: String,
}

pub struct InstagramPublisher {
    client: reqwest::Client,
    access_token: String,
    business_account_id: String,
}

impl InstagramPublisher {
    pub fn new(access_token: String, business_account_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            business_account_id,
        }
    }

    async fn graph_post(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        let resp = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .context("Graph API request failed")?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = serde_json::from_str::<GraphError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            bail!("Graph API error ({}): {}", status.as_u16(), message);
        }

        let parsed: IdResponse =
            serde_json::from_str(&body).context("Graph API response missing id")?;
        Ok(parsed.id)
    }

    /// Publish an image post. `image_url` must be publicly reachable.
    /// Returns the published media id.
    pub async fn publish_photo(&self, image_url: &str, caption: &str) -> Result<String> {
        let container_url = format!("{}/{}/media", GRAPH_API_BASE, self.business_account_id);
        let container_id = self
            .graph_post(
                &container_url,
                &[
                    ("image_url", image_url),
                    ("caption", caption),
                    ("access_token", &self.access_token),
                ],
            )
            .await
            .context("Failed to create media container")?;

        tracing::debug!(container_id, "Media container created");

        let publish_url = format!(
            "{}/{}/media_publish",
            GRAPH_API_BASE, self.business_account_id
        );
        self.graph_post(
            &publish_url,
            &[
                ("creation_id", &container_id),
                ("access_token", &self.access_token),
            ],
        )
        .await
        .context("Failed to publish media container")
    }

    /// Publish a video as a reel. `video_url` must be publicly reachable.
    pub async fn publish_video(&self, video_url: &str, caption: &str) -> Result<String> {
        let container_url = format!("{}/{}/media", GRAPH_API_BASE, self.business_account_id);
        let container_id = self
            .graph_post(
                &container_url,
                &[
                    ("media_type", "REELS"),
                    ("video_url", video_url),
                    ("caption", caption),
                    ("access_token", &self.access_token),
                ],
            )
            .await
            .context("Failed to create video container")?;

        tracing::debug!(container_id, "Video container created");

        let publish_url = format!(
            "{}/{}/media_publish",
            GRAPH_API_BASE, self.business_account_id
        );
        self.graph_post(
            &publish_url,
            &[
                ("creation_id", &container_id),
                ("access_token", &self.access_token),
            ],
        )
        .await
        .context("Failed to publish video container")
    }
}
