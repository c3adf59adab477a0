use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Where the media came from. `Fallback` marks the locally configured
/// default image used when every provider came up empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "media_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    Unsplash,
    Pexels,
    Pixabay,
    Fallback,
}

impl From<stock_media::MediaSource> for MediaSource {
    fn from(source: stock_media::MediaSource) -> Self {
        match source {
            stock_media::MediaSource::Unsplash => MediaSource::Unsplash,
            stock_media::MediaSource::Pexels => MediaSource::Pexels,
            stock_media::MediaSource::Pixabay => MediaSource::Pixabay,
            stock_media::MediaSource::Fallback => MediaSource::Fallback,
        }
    }
}

/// Downloaded media attached to one post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaContent {
    pub reddit_id: String,
    pub kind: MediaKind,
    pub source: MediaSource,
    pub source_id: String,
    pub source_url: String,
    pub file_path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_secs: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl MediaContent {
    /// Insert or replace the media attached to a post
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        reddit_id: &str,
        kind: MediaKind,
        source: MediaSource,
        source_id: &str,
        source_url: &str,
        file_path: &str,
        width: Option<i32>,
        height: Option<i32>,
        duration_secs: Option<f64>,
        pool: &PgPool,
    ) -> Result<Self> {
        let media = sqlx::query_as::<_, MediaContent>(
            r#"
            INSERT INTO media_contents (
                reddit_id,
                kind,
                source,
                source_id,
                source_url,
                file_path,
                width,
                height,
                duration_secs
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (reddit_id) DO UPDATE SET
                kind = EXCLUDED.kind,
                source = EXCLUDED.source,
                source_id = EXCLUDED.source_id,
                source_url = EXCLUDED.source_url,
                file_path = EXCLUDED.file_path,
                width = EXCLUDED.width,
                height = EXCLUDED.height,
                duration_secs = EXCLUDED.duration_secs
            RETURNING *
            "#,
        )
        .bind(reddit_id)
        .bind(kind)
        .bind(source)
        .bind(source_id)
        .bind(source_url)
        .bind(file_path)
        .bind(width)
        .bind(height)
        .bind(duration_secs)
        .fetch_one(pool)
        .await?;
        Ok(media)
    }

    /// Find media by post ID
    pub async fn find_by_id(reddit_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let media = sqlx::query_as::<_, MediaContent>(
            "SELECT * FROM media_contents WHERE reddit_id = $1",
        )
        .bind(reddit_id)
        .fetch_optional(pool)
        .await?;
        Ok(media)
    }
}
