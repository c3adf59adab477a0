//! Turn scraped posts into platform-ready captions and hashtags.

use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::domains::processing::captions::{format_for_instagram, format_for_tiktok};
use crate::domains::processing::constants::{INSTAGRAM_MAX_HASHTAGS, TIKTOK_MAX_HASHTAGS};
use crate::domains::processing::hashtags::generate_hashtags;
use crate::domains::processing::keywords::{clean_text, extract_keywords};
use crate::domains::processing::models::{AiGenerationLog, ProcessedContent};
use crate::domains::processing::prompts::{build_caption_prompt, parse_caption_response};
use crate::domains::scraping::models::{RedditPost, RedditPostStatus};
use crate::kernel::{BaseAI, PipelineDeps};

const BATCH_SIZE: i64 = 25;

/// Statuses picked up by a processing run. `pending_processing` covers posts
/// stranded by a crash mid-batch and reviewer-requested reprocessing.
const PROCESSABLE_STATUSES: [RedditPostStatus; 2] =
    [RedditPostStatus::New, RedditPostStatus::PendingProcessing];

/// Counts from one processing run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    pub ai_generated: usize,
    pub failed: usize,
}

/// Generated captions plus how they were produced
#[derive(Debug, Clone)]
pub struct GeneratedContent {
    pub instagram_caption: String,
    pub instagram_hashtags: Vec<String>,
    pub tiktok_caption: String,
    pub tiktok_hashtags: Vec<String>,
    pub keywords: Vec<String>,
    pub ai_generated: bool,
}

/// Generate captions for one post.
///
/// Tries the LLM when one is configured, logging each attempt; any failure
/// falls back to deterministic keyword-based generation so processing never
/// depends on the API being up.
pub async fn generate_content(
    post: &RedditPost,
    ai: Option<&dyn BaseAI>,
    pool: &PgPool,
) -> GeneratedContent {
    let cleaned_title = clean_text(&post.title);
    let cleaned_body = clean_text(&post.body);
    let combined = format!("{} {}", cleaned_title, cleaned_body);
    let keywords = extract_keywords(&combined);

    if let Some(ai) = ai {
        let prompt = build_caption_prompt(&cleaned_title, &cleaned_body, &post.subreddit);
        match ai.complete_json(&prompt).await {
            Ok(completion) => match parse_caption_response(&completion.text) {
                Ok(captions) => {
                    let _ = AiGenerationLog::record(
                        &post.reddit_id,
                        "caption_generation",
                        ai.model_name(),
                        &prompt,
                        Some(&completion.text),
                        true,
                        completion.tokens_used as i64,
                        None,
                        pool,
                    )
                    .await;

                    let mut instagram_hashtags = captions.hashtags.clone();
                    instagram_hashtags.truncate(INSTAGRAM_MAX_HASHTAGS);
                    let mut tiktok_hashtags = captions.hashtags;
                    tiktok_hashtags.truncate(TIKTOK_MAX_HASHTAGS);

                    return GeneratedContent {
                        instagram_caption: captions.instagram_caption,
                        instagram_hashtags,
                        tiktok_caption: captions.tiktok_caption,
                        tiktok_hashtags,
                        keywords,
                        ai_generated: true,
                    };
                }
                Err(e) => {
                    warn!(reddit_id = %post.reddit_id, error = %e, "LLM reply unusable, falling back");
                    let _ = AiGenerationLog::record(
                        &post.reddit_id,
                        "caption_generation",
                        ai.model_name(),
                        &prompt,
                        Some(&completion.text),
                        false,
                        completion.tokens_used as i64,
                        Some(&e.to_string()),
                        pool,
                    )
                    .await;
                }
            },
            Err(e) => {
                warn!(reddit_id = %post.reddit_id, error = %e, "LLM call failed, falling back");
                let _ = AiGenerationLog::record(
                    &post.reddit_id,
                    "caption_generation",
                    ai.model_name(),
                    &prompt,
                    None,
                    false,
                    0,
                    Some(&e.to_string()),
                    pool,
                )
                .await;
            }
        }
    }

    let instagram_hashtags = generate_hashtags(&keywords, &combined, INSTAGRAM_MAX_HASHTAGS);
    let tiktok_hashtags = generate_hashtags(&keywords, &combined, TIKTOK_MAX_HASHTAGS);

    GeneratedContent {
        instagram_caption: format_for_instagram(&cleaned_title, &cleaned_body, &instagram_hashtags),
        tiktok_caption: format_for_tiktok(&cleaned_title, &tiktok_hashtags),
        instagram_hashtags,
        tiktok_hashtags,
        keywords,
        ai_generated: false,
    }
}

/// Process a batch of posts in status 'new' or 'pending_processing'.
///
/// Each post moves to 'processed' on success or 'failed' when caption
/// storage fails; one bad post never aborts the batch.
pub async fn process_pending_posts(deps: &PipelineDeps) -> Result<ProcessSummary> {
    let posts = RedditPost::find_by_statuses(&PROCESSABLE_STATUSES, BATCH_SIZE, &deps.db_pool).await?;
    let mut summary = ProcessSummary::default();

    for post in posts {
        RedditPost::update_status(
            &post.reddit_id,
            RedditPostStatus::PendingProcessing,
            &deps.db_pool,
        )
        .await?;

        let content = generate_content(&post, deps.ai.as_deref(), &deps.db_pool).await;
        if content.ai_generated {
            summary.ai_generated += 1;
        }

        let stored = ProcessedContent::upsert(
            &post.reddit_id,
            &content.instagram_caption,
            &content.instagram_hashtags,
            &content.tiktok_caption,
            &content.tiktok_hashtags,
            &content.keywords,
            content.ai_generated,
            &deps.db_pool,
        )
        .await;

        match stored {
            Ok(_) => {
                RedditPost::update_status(
                    &post.reddit_id,
                    RedditPostStatus::Processed,
                    &deps.db_pool,
                )
                .await?;
                summary.processed += 1;
                info!(reddit_id = %post.reddit_id, ai = content.ai_generated, "Post processed");
            }
            Err(e) => {
                warn!(reddit_id = %post.reddit_id, error = %e, "Failed to store content");
                RedditPost::update_status(&post.reddit_id, RedditPostStatus::Failed, &deps.db_pool)
                    .await?;
                summary.failed += 1;
            }
        }
    }

    info!(
        processed = summary.processed,
        ai_generated = summary.ai_generated,
        failed = summary.failed,
        "Processing run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    // Lazy pool never connects; the fallback path does no DB work and the
    // LLM log write swallows connection errors.
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://127.0.0.1:1/unused")
            .unwrap()
    }

    fn post() -> RedditPost {
        RedditPost {
            reddit_id: "abc123".to_string(),
            subreddit: "todayilearned".to_string(),
            title: "TIL octopuses have nine brains".to_string(),
            body: "Each arm has its own brain controlling movement.".to_string(),
            url: None,
            author: Some("user".to_string()),
            permalink: "https://reddit.com/r/todayilearned/abc123".to_string(),
            upvotes: 5000,
            num_comments: 120,
            posted_at: Utc::now(),
            status: RedditPostStatus::New,
            scraped_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn processing_picks_up_stranded_and_reprocess_requests() {
        assert!(PROCESSABLE_STATUSES.contains(&RedditPostStatus::New));
        assert!(PROCESSABLE_STATUSES.contains(&RedditPostStatus::PendingProcessing));
    }

    #[tokio::test]
    async fn falls_back_to_deterministic_generation_without_ai() {
        let pool = lazy_pool();
        let content = generate_content(&post(), None, &pool).await;

        assert!(!content.ai_generated);
        assert!(content.instagram_caption.contains("Source: Reddit"));
        assert!(content.instagram_hashtags.len() <= INSTAGRAM_MAX_HASHTAGS);
        assert!(content.tiktok_hashtags.len() <= TIKTOK_MAX_HASHTAGS);
        assert!(content.keywords.iter().any(|k| k == "octopuses" || k == "brains"));
    }

    #[tokio::test]
    async fn uses_llm_captions_when_reply_parses() {
        let pool = lazy_pool();
        let ai = MockAI::new().with_response(
            r##"{"instagram_caption": "ig caption", "tiktok_caption": "tt caption", "hashtags": ["#facts"]}"##,
        );

        let content = generate_content(&post(), Some(&ai as &dyn BaseAI), &pool).await;

        assert!(content.ai_generated);
        assert_eq!(content.instagram_caption, "ig caption");
        assert_eq!(content.tiktok_caption, "tt caption");
        assert_eq!(content.instagram_hashtags, vec!["#facts"]);
        assert_eq!(ai.calls().len(), 1);
    }

    #[tokio::test]
    async fn falls_back_when_llm_reply_is_malformed() {
        let pool = lazy_pool();
        let ai = MockAI::new().with_response("sorry, I cannot help with that");

        let content = generate_content(&post(), Some(&ai as &dyn BaseAI), &pool).await;

        assert!(!content.ai_generated);
        assert!(!content.instagram_caption.is_empty());
    }

    #[tokio::test]
    async fn falls_back_when_llm_call_errors() {
        let pool = lazy_pool();
        let ai = MockAI::new().with_error("rate limited");

        let content = generate_content(&post(), Some(&ai as &dyn BaseAI), &pool).await;

        assert!(!content.ai_generated);
        assert!(!content.tiktok_caption.is_empty());
    }
}
