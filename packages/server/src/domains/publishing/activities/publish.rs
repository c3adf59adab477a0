//! Publish validated content to the configured platforms.

use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::domains::media::models::{MediaContent, MediaKind};
use crate::domains::processing::models::{ContentStatus, ProcessedContent};
use crate::domains::publishing::instagram::InstagramPublisher;
use crate::domains::publishing::tiktok::TikTokPublisher;
use crate::domains::publishing::models::{Platform, PublishLog};
use crate::domains::scraping::models::{RedditPost, RedditPostStatus};
use crate::kernel::PipelineDeps;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(5);
const BATCH_SIZE: i64 = 10;

/// Counts from one publish run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    pub published: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// One destination platform
#[async_trait]
pub trait Publisher: Send + Sync {
    fn platform(&self) -> Platform;

    /// Push the content, returning the remote post id
    async fn publish(&self, caption: &str, media: &MediaContent) -> Result<String>;
}

#[async_trait]
impl Publisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn publish(&self, caption: &str, media: &MediaContent) -> Result<String> {
        if media.source_url.is_empty() {
            bail!("media has no public source URL");
        }
        match media.kind {
            MediaKind::Image => self.publish_photo(&media.source_url, caption).await,
            MediaKind::Video => self.publish_video(&media.source_url, caption).await,
        }
    }
}

#[async_trait]
impl Publisher for TikTokPublisher {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    async fn publish(&self, caption: &str, media: &MediaContent) -> Result<String> {
        if media.kind != MediaKind::Video {
            bail!("TikTok only accepts video media");
        }
        if media.source_url.is_empty() {
            bail!("media has no public source URL");
        }
        self.publish_video(&media.source_url, caption).await
    }
}

/// Attempt a publish with linear backoff.
///
/// Returns the remote id and the number of attempts used.
pub async fn publish_with_retry(
    publisher: &dyn Publisher,
    caption: &str,
    media: &MediaContent,
    base_delay: Duration,
) -> (Result<String>, u32) {
    let mut last_err = None;
    for attempt in 1..=MAX_ATTEMPTS {
        match publisher.publish(caption, media).await {
            Ok(remote_id) => return (Ok(remote_id), attempt),
            Err(e) => {
                warn!(
                    platform = publisher.platform().as_str(),
                    attempt,
                    error = %e,
                    "Publish attempt failed"
                );
                last_err = Some(e);
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(base_delay * attempt).await;
                }
            }
        }
    }
    (
        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("publish never attempted"))),
        MAX_ATTEMPTS,
    )
}

fn build_publishers(deps: &PipelineDeps) -> Vec<Box<dyn Publisher>> {
    let mut publishers: Vec<Box<dyn Publisher>> = Vec::new();
    if let (Some(token), Some(account)) = (
        &deps.config.instagram_access_token,
        &deps.config.instagram_business_account_id,
    ) {
        publishers.push(Box::new(InstagramPublisher::new(
            token.clone(),
            account.clone(),
        )));
    }
    if let Some(token) = &deps.config.tiktok_access_token {
        publishers.push(Box::new(TikTokPublisher::new(token.clone())));
    }
    publishers
}

/// Publish one post to every configured platform that has not already
/// accepted it. Each outcome is appended to the publish log; the content
/// moves to `published` when at least one platform accepted it.
pub async fn publish_content(content: &ProcessedContent, deps: &PipelineDeps) -> Result<bool> {
    let media = match MediaContent::find_by_id(&content.reddit_id, &deps.db_pool).await? {
        Some(media) => media,
        None => bail!("no media attached to {}", content.reddit_id),
    };

    let publishers = build_publishers(deps);
    if publishers.is_empty() {
        bail!("no publishing platform configured");
    }

    let mut any_success = false;
    for publisher in &publishers {
        let platform = publisher.platform();
        if PublishLog::succeeded(&content.reddit_id, platform, &deps.db_pool).await? {
            continue;
        }

        let caption = match platform {
            Platform::Instagram => &content.instagram_caption,
            Platform::Tiktok => &content.tiktok_caption,
        };

        let (result, attempts) =
            publish_with_retry(publisher.as_ref(), caption, &media, RETRY_BASE_DELAY).await;

        match result {
            Ok(remote_id) => {
                info!(
                    reddit_id = %content.reddit_id,
                    platform = platform.as_str(),
                    remote_id,
                    "Published"
                );
                PublishLog::append(
                    &content.reddit_id,
                    platform,
                    true,
                    Some(&remote_id),
                    None,
                    attempts as i32,
                    &deps.db_pool,
                )
                .await?;
                any_success = true;
            }
            Err(e) => {
                warn!(
                    reddit_id = %content.reddit_id,
                    platform = platform.as_str(),
                    error = %e,
                    "Publish failed after retries"
                );
                PublishLog::append(
                    &content.reddit_id,
                    platform,
                    false,
                    None,
                    Some(&e.to_string()),
                    attempts as i32,
                    &deps.db_pool,
                )
                .await?;
            }
        }
    }

    if any_success {
        ProcessedContent::update_status(&content.reddit_id, ContentStatus::Published, &deps.db_pool)
            .await?;
        RedditPost::update_status(&content.reddit_id, RedditPostStatus::Published, &deps.db_pool)
            .await?;
    } else {
        ProcessedContent::update_status(&content.reddit_id, ContentStatus::Failed, &deps.db_pool)
            .await?;
    }

    Ok(any_success)
}

/// Publish every validated content row that has media attached.
pub async fn publish_validated_contents(deps: &PipelineDeps) -> Result<PublishSummary> {
    let ready = ProcessedContent::find_ready_to_publish(BATCH_SIZE, &deps.db_pool).await?;
    let mut summary = PublishSummary::default();

    for content in ready {
        match publish_content(&content, deps).await {
            Ok(true) => summary.published += 1,
            Ok(false) => summary.failed += 1,
            Err(e) => {
                warn!(reddit_id = %content.reddit_id, error = %e, "Skipping content");
                summary.skipped += 1;
            }
        }
    }

    info!(
        published = summary.published,
        failed = summary.failed,
        skipped = summary.skipped,
        "Publish run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use uuid::Uuid;

    struct FlakyPublisher {
        fail_first: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl Publisher for FlakyPublisher {
        fn platform(&self) -> Platform {
            Platform::Instagram
        }

        async fn publish(&self, _caption: &str, _media: &MediaContent) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.fail_first {
                bail!("transient error on call {}", call);
            }
            Ok(format!("remote-{}", Uuid::new_v4()))
        }
    }

    fn media() -> MediaContent {
        MediaContent {
            reddit_id: "abc".to_string(),
            kind: MediaKind::Image,
            source: crate::domains::media::models::MediaSource::Pexels,
            source_id: "1".to_string(),
            source_url: "https://example.com/photo.jpg".to_string(),
            file_path: "media/images/abc.jpg".to_string(),
            width: Some(1080),
            height: Some(1080),
            duration_secs: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let publisher = FlakyPublisher {
            fail_first: 2,
            calls: AtomicU32::new(0),
        };
        let (result, attempts) =
            publish_with_retry(&publisher, "caption", &media(), Duration::ZERO).await;
        assert!(result.is_ok());
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn gives_up_after_three_attempts() {
        let publisher = FlakyPublisher {
            fail_first: 10,
            calls: AtomicU32::new(0),
        };
        let (result, attempts) =
            publish_with_retry(&publisher, "caption", &media(), Duration::ZERO).await;
        assert!(result.is_err());
        assert_eq!(attempts, 3);
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 3);
    }
}
