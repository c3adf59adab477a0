use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Review lifecycle of generated content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "content_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    PendingValidation,
    Validated,
    Rejected,
    Published,
    Failed,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::PendingValidation => "pending_validation",
            ContentStatus::Validated => "validated",
            ContentStatus::Rejected => "rejected",
            ContentStatus::Published => "published",
            ContentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending_validation" => Some(ContentStatus::PendingValidation),
            "validated" => Some(ContentStatus::Validated),
            "rejected" => Some(ContentStatus::Rejected),
            "published" => Some(ContentStatus::Published),
            "failed" => Some(ContentStatus::Failed),
            _ => None,
        }
    }
}

/// Platform captions and hashtags generated for one Reddit post.
///
/// New rows start in `pending_validation` and wait for a reviewer unless
/// auto-publish is enabled.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProcessedContent {
    pub reddit_id: String,
    pub instagram_caption: String,
    pub instagram_hashtags: Vec<String>,
    pub tiktok_caption: String,
    pub tiktok_hashtags: Vec<String>,
    pub keywords: Vec<String>,
    pub ai_generated: bool,
    pub has_media: bool,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ProcessedContent {
    /// Insert or replace generated content for a post
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        reddit_id: &str,
        instagram_caption: &str,
        instagram_hashtags: &[String],
        tiktok_caption: &str,
        tiktok_hashtags: &[String],
        keywords: &[String],
        ai_generated: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let content = sqlx::query_as::<_, ProcessedContent>(
            r#"
            INSERT INTO processed_contents (
                reddit_id,
                instagram_caption,
                instagram_hashtags,
                tiktok_caption,
                tiktok_hashtags,
                keywords,
                ai_generated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (reddit_id) DO UPDATE SET
                instagram_caption = EXCLUDED.instagram_caption,
                instagram_hashtags = EXCLUDED.instagram_hashtags,
                tiktok_caption = EXCLUDED.tiktok_caption,
                tiktok_hashtags = EXCLUDED.tiktok_hashtags,
                keywords = EXCLUDED.keywords,
                ai_generated = EXCLUDED.ai_generated,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(instagram_caption)
        .bind(instagram_hashtags)
        .bind(tiktok_caption)
        .bind(tiktok_hashtags)
        .bind(keywords)
        .bind(ai_generated)
        .fetch_one(pool)
        .await?;
        Ok(content)
    }

    /// Find content by post ID
    pub async fn find_by_id(reddit_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let content = sqlx::query_as::<_, ProcessedContent>(
            "SELECT * FROM processed_contents WHERE reddit_id = $1",
        )
        .bind(reddit_id)
        .fetch_optional(pool)
        .await?;
        Ok(content)
    }

    /// Find content in a given status, oldest first
    pub async fn find_by_status(
        status: ContentStatus,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let contents = sqlx::query_as::<_, ProcessedContent>(
            r#"
            SELECT * FROM processed_contents
            WHERE status = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(status)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(contents)
    }

    /// Update review status
    pub async fn update_status(
        reddit_id: &str,
        status: ContentStatus,
        pool: &PgPool,
    ) -> Result<Self> {
        let content = sqlx::query_as::<_, ProcessedContent>(
            r#"
            UPDATE processed_contents
            SET status = $2, updated_at = NOW()
            WHERE reddit_id = $1
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(content)
    }

    /// Update captions from the review UI
    pub async fn update_captions(
        reddit_id: &str,
        instagram_caption: &str,
        tiktok_caption: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let content = sqlx::query_as::<_, ProcessedContent>(
            r#"
            UPDATE processed_contents
            SET instagram_caption = $2, tiktok_caption = $3, updated_at = NOW()
            WHERE reddit_id = $1
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(instagram_caption)
        .bind(tiktok_caption)
        .fetch_one(pool)
        .await?;
        Ok(content)
    }

    /// Mark that media was attached for this post
    pub async fn mark_has_media(reddit_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "UPDATE processed_contents SET has_media = TRUE, updated_at = NOW() WHERE reddit_id = $1",
        )
        .bind(reddit_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find content still waiting for media, oldest first
    pub async fn find_missing_media(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let contents = sqlx::query_as::<_, ProcessedContent>(
            r#"
            SELECT * FROM processed_contents
            WHERE has_media = FALSE
              AND status NOT IN ('rejected', 'failed')
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(contents)
    }

    /// Find validated content that already has media, ready to publish
    pub async fn find_ready_to_publish(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let contents = sqlx::query_as::<_, ProcessedContent>(
            r#"
            SELECT * FROM processed_contents
            WHERE status = 'validated'
              AND has_media = TRUE
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            ContentStatus::PendingValidation,
            ContentStatus::Validated,
            ContentStatus::Rejected,
            ContentStatus::Published,
            ContentStatus::Failed,
        ] {
            assert_eq!(ContentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ContentStatus::parse("bogus"), None);
    }
}
