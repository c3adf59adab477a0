//! Attach stock media to processed posts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{info, warn};

use stock_media::{StockPhoto, StockVideo};

use crate::common::slugify;
use crate::domains::media::image_ops::square_for_instagram;
use crate::domains::media::models::{MediaContent, MediaKind, MediaSource};
use crate::domains::processing::models::ProcessedContent;
use crate::domains::scraping::models::RedditPost;
use crate::kernel::PipelineDeps;

const BATCH_SIZE: i64 = 25;
const RESULTS_PER_SEARCH: u32 = 10;

/// Counts from one media run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaSummary {
    pub videos: usize,
    pub images: usize,
    pub fallbacks: usize,
    pub skipped: usize,
}

/// Search query for one post: stored keywords first, then hashtags with
/// the '#' stripped, then the first words of the title.
pub fn resolve_query(content: &ProcessedContent, title: &str) -> String {
    if !content.keywords.is_empty() {
        return content.keywords[..content.keywords.len().min(3)].join(" ");
    }
    let tags: Vec<&str> = content
        .instagram_hashtags
        .iter()
        .take(3)
        .map(|t| t.trim_start_matches('#'))
        .collect();
    if !tags.is_empty() {
        return tags.join(" ");
    }
    title.split_whitespace().take(5).collect::<Vec<_>>().join(" ")
}

fn pick_random<T>(items: Vec<T>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = rand::thread_rng().gen_range(0..items.len());
    items.into_iter().nth(idx)
}

async fn download(url: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let resp = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Download of {} rejected", url))?;
    let bytes = resp.bytes().await?;
    tokio::fs::write(dest, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(())
}

/// Try video providers in order: Pexels then Pixabay
async fn find_video(deps: &PipelineDeps, query: &str) -> Option<StockVideo> {
    if let Some(pexels) = &deps.pexels {
        match pexels.search_videos(query, RESULTS_PER_SEARCH).await {
            Ok(videos) => {
                if let Some(video) = pick_random(videos) {
                    return Some(video);
                }
            }
            Err(e) => warn!(query, error = %e, "Pexels video search failed"),
        }
    }
    if let Some(pixabay) = &deps.pixabay {
        match pixabay.search_videos(query, RESULTS_PER_SEARCH).await {
            Ok(videos) => {
                if let Some(video) = pick_random(videos) {
                    return Some(video);
                }
            }
            Err(e) => warn!(query, error = %e, "Pixabay video search failed"),
        }
    }
    None
}

/// Try photo providers in order: Unsplash, Pexels, Pixabay
async fn find_photo(deps: &PipelineDeps, query: &str) -> Option<StockPhoto> {
    if let Some(unsplash) = &deps.unsplash {
        match unsplash.search_photos(query, RESULTS_PER_SEARCH).await {
            Ok(photos) => {
                if let Some(photo) = pick_random(photos) {
                    return Some(photo);
                }
            }
            Err(e) => warn!(query, error = %e, "Unsplash photo search failed"),
        }
    }
    if let Some(pexels) = &deps.pexels {
        match pexels.search_photos(query, RESULTS_PER_SEARCH).await {
            Ok(photos) => {
                if let Some(photo) = pick_random(photos) {
                    return Some(photo);
                }
            }
            Err(e) => warn!(query, error = %e, "Pexels photo search failed"),
        }
    }
    if let Some(pixabay) = &deps.pixabay {
        match pixabay.search_photos(query, RESULTS_PER_SEARCH).await {
            Ok(photos) => {
                if let Some(photo) = pick_random(photos) {
                    return Some(photo);
                }
            }
            Err(e) => warn!(query, error = %e, "Pixabay photo search failed"),
        }
    }
    None
}

/// Find and download media for every processed post still missing it.
///
/// Videos are preferred; when no provider returns one, a photo is
/// downloaded and squared for Instagram. When everything fails the
/// configured fallback image is recorded so publishing can proceed.
pub async fn attach_media(deps: &PipelineDeps) -> Result<MediaSummary> {
    let pending = ProcessedContent::find_missing_media(BATCH_SIZE, &deps.db_pool).await?;
    let mut summary = MediaSummary::default();

    for content in pending {
        let post = match RedditPost::find_by_id(&content.reddit_id, &deps.db_pool).await? {
            Some(post) => post,
            None => {
                warn!(reddit_id = %content.reddit_id, "Content without a source post, skipping");
                summary.skipped += 1;
                continue;
            }
        };

        let query = resolve_query(&content, &post.title);
        let slug = slugify(&post.title);
        info!(reddit_id = %content.reddit_id, query, "Searching media");

        if let Some(video) = find_video(deps, &query).await {
            let dest = PathBuf::from(&deps.config.media_dir)
                .join("videos")
                .join(format!("{}-{}.mp4", content.reddit_id, slug));
            match download(&video.download_url, &dest).await {
                Ok(()) => {
                    MediaContent::upsert(
                        &content.reddit_id,
                        MediaKind::Video,
                        video.source.into(),
                        &video.source_id,
                        &video.download_url,
                        &dest.to_string_lossy(),
                        Some(video.width as i32),
                        Some(video.height as i32),
                        video.duration_secs,
                        &deps.db_pool,
                    )
                    .await?;
                    ProcessedContent::mark_has_media(&content.reddit_id, &deps.db_pool).await?;
                    summary.videos += 1;
                    continue;
                }
                Err(e) => warn!(reddit_id = %content.reddit_id, error = %e, "Video download failed"),
            }
        }

        if let Some(photo) = find_photo(deps, &query).await {
            let dest = PathBuf::from(&deps.config.media_dir)
                .join("images")
                .join(format!("{}-{}.jpg", content.reddit_id, slug));
            match download(&photo.download_url, &dest).await {
                Ok(()) => {
                    if let Err(e) = square_for_instagram(&dest) {
                        warn!(reddit_id = %content.reddit_id, error = %e, "Image processing failed");
                    }
                    MediaContent::upsert(
                        &content.reddit_id,
                        MediaKind::Image,
                        photo.source.into(),
                        &photo.source_id,
                        &photo.download_url,
                        &dest.to_string_lossy(),
                        Some(photo.width as i32),
                        Some(photo.height as i32),
                        None,
                        &deps.db_pool,
                    )
                    .await?;
                    ProcessedContent::mark_has_media(&content.reddit_id, &deps.db_pool).await?;
                    summary.images += 1;
                    continue;
                }
                Err(e) => warn!(reddit_id = %content.reddit_id, error = %e, "Image download failed"),
            }
        }

        match &deps.config.fallback_image_path {
            Some(fallback) => {
                MediaContent::upsert(
                    &content.reddit_id,
                    MediaKind::Image,
                    MediaSource::Fallback,
                    "fallback",
                    "",
                    fallback,
                    None,
                    None,
                    None,
                    &deps.db_pool,
                )
                .await?;
                ProcessedContent::mark_has_media(&content.reddit_id, &deps.db_pool).await?;
                summary.fallbacks += 1;
            }
            None => {
                warn!(reddit_id = %content.reddit_id, "No media found and no fallback configured");
                summary.skipped += 1;
            }
        }
    }

    info!(
        videos = summary.videos,
        images = summary.images,
        fallbacks = summary.fallbacks,
        skipped = summary.skipped,
        "Media run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn content(keywords: Vec<&str>, hashtags: Vec<&str>) -> ProcessedContent {
        ProcessedContent {
            reddit_id: "abc".to_string(),
            instagram_caption: String::new(),
            instagram_hashtags: hashtags.into_iter().map(String::from).collect(),
            tiktok_caption: String::new(),
            tiktok_hashtags: vec![],
            keywords: keywords.into_iter().map(String::from).collect(),
            ai_generated: false,
            has_media: false,
            status: crate::domains::processing::models::ContentStatus::PendingValidation,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn prefers_keywords_over_hashtags_and_title() {
        let c = content(vec!["octopus", "brains", "ocean", "extra"], vec!["#science"]);
        assert_eq!(resolve_query(&c, "ignored title"), "octopus brains ocean");
    }

    #[test]
    fn strips_hashes_when_falling_back_to_hashtags() {
        let c = content(vec![], vec!["#science", "#facts"]);
        assert_eq!(resolve_query(&c, "ignored"), "science facts");
    }

    #[test]
    fn falls_back_to_title_words() {
        let c = content(vec![], vec![]);
        assert_eq!(
            resolve_query(&c, "TIL the moon has quakes every night"),
            "TIL the moon has quakes"
        );
    }
}
