//! Scrape trending posts from the configured subreddits

use anyhow::Result;
use tracing::{error, info, warn};

use reddit_client::types::{Post, TimeFilter};

use crate::common::clean_html;
use crate::domains::scraping::models::RedditPost;
use crate::kernel::PipelineDeps;

/// Counts from one scrape run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub fetched: usize,
    pub stored: usize,
    pub skipped: usize,
    pub failed_subreddits: usize,
}

/// Fetch top posts from each configured subreddit and store the ones that
/// pass filtering.
///
/// A failing subreddit is logged and skipped so the rest of the run
/// completes.
pub async fn scrape_subreddits(deps: &PipelineDeps) -> Result<ScrapeSummary> {
    let time_filter = TimeFilter::parse(&deps.config.time_filter);
    let mut summary = ScrapeSummary::default();

    for subreddit in &deps.config.subreddits {
        info!(subreddit, "Scraping subreddit");

        let posts = match deps
            .reddit
            .top_posts(subreddit, time_filter, deps.config.post_limit)
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                error!(subreddit, error = %e, "Failed to fetch subreddit, skipping");
                summary.failed_subreddits += 1;
                continue;
            }
        };

        summary.fetched += posts.len();

        for post in posts {
            if !passes_filters(&post, deps.config.min_upvotes) {
                summary.skipped += 1;
                continue;
            }

            match RedditPost::exists(&post.id, &deps.db_pool).await {
                Ok(true) => {
                    summary.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(reddit_id = %post.id, error = %e, "Existence check failed");
                    summary.skipped += 1;
                    continue;
                }
            }

            // Reddit bodies arrive with markup and escaped entities.
            let stored = RedditPost::insert(
                &post.id,
                &post.subreddit,
                &clean_html(&post.title),
                &clean_html(&post.selftext),
                post.url.as_deref(),
                post.author.as_deref(),
                &post.full_permalink(),
                post.score,
                post.num_comments,
                post.created_at(),
                &deps.db_pool,
            )
            .await;

            match stored {
                Ok(_) => summary.stored += 1,
                Err(e) => {
                    warn!(reddit_id = %post.id, error = %e, "Failed to store post");
                    summary.skipped += 1;
                }
            }
        }
    }

    info!(
        fetched = summary.fetched,
        stored = summary.stored,
        skipped = summary.skipped,
        failed_subreddits = summary.failed_subreddits,
        "Scrape run complete"
    );

    Ok(summary)
}

/// Drop NSFW, stickied and under-threshold posts before they reach the store
fn passes_filters(post: &Post, min_upvotes: i64) -> bool {
    !post.over_18 && !post.stickied && post.score >= min_upvotes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(score: i64, over_18: bool, stickied: bool) -> Post {
        Post {
            id: "abc".to_string(),
            title: "title".to_string(),
            selftext: String::new(),
            url: None,
            subreddit: "test".to_string(),
            score,
            num_comments: 0,
            created_utc: 0.0,
            author: Some("user".to_string()),
            permalink: "/r/test/abc".to_string(),
            over_18,
            stickied,
        }
    }

    #[test]
    fn filters_low_score_nsfw_and_stickied() {
        assert!(passes_filters(&post(1500, false, false), 1000));
        assert!(!passes_filters(&post(999, false, false), 1000));
        assert!(!passes_filters(&post(1500, true, false), 1000));
        assert!(!passes_filters(&post(1500, false, true), 1000));
    }
}
