use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Lifecycle of a scraped post through the pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "reddit_post_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RedditPostStatus {
    New,
    PendingProcessing,
    Processed,
    Failed,
    Published,
    Archived,
}

impl RedditPostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedditPostStatus::New => "new",
            RedditPostStatus::PendingProcessing => "pending_processing",
            RedditPostStatus::Processed => "processed",
            RedditPostStatus::Failed => "failed",
            RedditPostStatus::Published => "published",
            RedditPostStatus::Archived => "archived",
        }
    }
}

/// A trending Reddit post captured by the scraper.
///
/// `reddit_id` is the natural key for the whole pipeline: processed content,
/// media and publish logs all reference it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RedditPost {
    pub reddit_id: String,
    pub subreddit: String,
    pub title: String,
    pub body: String,
    pub url: Option<String>,
    pub author: Option<String>,
    pub permalink: String,
    pub upvotes: i64,
    pub num_comments: i64,
    pub posted_at: DateTime<Utc>,
    pub status: RedditPostStatus,
    pub scraped_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl RedditPost {
    /// Insert a newly scraped post with status 'new'
    pub async fn insert(
        reddit_id: &str,
        subreddit: &str,
        title: &str,
        body: &str,
        url: Option<&str>,
        author: Option<&str>,
        permalink: &str,
        upvotes: i64,
        num_comments: i64,
        posted_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let post = sqlx::query_as::<_, RedditPost>(
            r#"
            INSERT INTO reddit_posts (
                reddit_id,
                subreddit,
                title,
                body,
                url,
                author,
                permalink,
                upvotes,
                num_comments,
                posted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(subreddit)
        .bind(title)
        .bind(body)
        .bind(url)
        .bind(author)
        .bind(permalink)
        .bind(upvotes)
        .bind(num_comments)
        .bind(posted_at)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Check whether a post has already been scraped
    pub async fn exists(reddit_id: &str, pool: &PgPool) -> Result<bool> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT reddit_id FROM reddit_posts WHERE reddit_id = $1")
                .bind(reddit_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    /// Find post by ID
    pub async fn find_by_id(reddit_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, RedditPost>(
            "SELECT * FROM reddit_posts WHERE reddit_id = $1",
        )
        .bind(reddit_id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// Find posts in a given status, oldest scrape first
    pub async fn find_by_status(
        status: RedditPostStatus,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, RedditPost>(
            r#"
            SELECT * FROM reddit_posts
            WHERE status = $1
            ORDER BY scraped_at ASC
            LIMIT $2
            "#,
        )
        .bind(status)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Find posts in any of the given statuses, oldest scrape first
    pub async fn find_by_statuses(
        statuses: &[RedditPostStatus],
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, RedditPost>(
            r#"
            SELECT * FROM reddit_posts
            WHERE status = ANY($1)
            ORDER BY scraped_at ASC
            LIMIT $2
            "#,
        )
        .bind(statuses)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Update post status
    pub async fn update_status(
        reddit_id: &str,
        status: RedditPostStatus,
        pool: &PgPool,
    ) -> Result<Self> {
        let post = sqlx::query_as::<_, RedditPost>(
            r#"
            UPDATE reddit_posts
            SET status = $2, updated_at = NOW()
            WHERE reddit_id = $1
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }
}
