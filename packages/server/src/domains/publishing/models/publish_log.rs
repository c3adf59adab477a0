use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "publish_platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
        }
    }
}

/// Append-only record of one publish attempt sequence
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PublishLog {
    pub id: Uuid,
    pub reddit_id: String,
    pub platform: Platform,
    pub success: bool,
    pub remote_id: Option<String>,
    pub error_message: Option<String>,
    pub attempts: i32,
    pub published_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl PublishLog {
    /// Append a publish outcome
    pub async fn append(
        reddit_id: &str,
        platform: Platform,
        success: bool,
        remote_id: Option<&str>,
        error_message: Option<&str>,
        attempts: i32,
        pool: &PgPool,
    ) -> Result<Self> {
        let log = sqlx::query_as::<_, PublishLog>(
            r#"
            INSERT INTO publish_logs (
                reddit_id,
                platform,
                success,
                remote_id,
                error_message,
                attempts
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(platform)
        .bind(success)
        .bind(remote_id)
        .bind(error_message)
        .bind(attempts)
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    /// History for one post, newest first
    pub async fn find_by_reddit_id(reddit_id: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let logs = sqlx::query_as::<_, PublishLog>(
            r#"
            SELECT * FROM publish_logs
            WHERE reddit_id = $1
            ORDER BY published_at DESC
            "#,
        )
        .bind(reddit_id)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    /// Whether a platform already accepted this post
    pub async fn succeeded(reddit_id: &str, platform: Platform, pool: &PgPool) -> Result<bool> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM publish_logs
            WHERE reddit_id = $1 AND platform = $2 AND success = TRUE
            LIMIT 1
            "#,
        )
        .bind(reddit_id)
        .bind(platform)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }
}
