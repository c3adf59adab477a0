use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Append-only record of one LLM call
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AiGenerationLog {
    pub id: Uuid,
    pub reddit_id: String,
    pub task: String,
    pub model: String,
    pub prompt: String,
    pub response: Option<String>,
    pub success: bool,
    pub tokens_used: i64,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AiGenerationLog {
    /// Record an LLM call. Logging failures are not fatal to the caller.
    pub async fn record(
        reddit_id: &str,
        task: &str,
        model: &str,
        prompt: &str,
        response: Option<&str>,
        success: bool,
        tokens_used: i64,
        error_message: Option<&str>,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_generation_logs (
                reddit_id,
                task,
                model,
                prompt,
                response,
                success,
                tokens_used,
                error_message
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reddit_id)
        .bind(task)
        .bind(model)
        .bind(prompt)
        .bind(response)
        .bind(success)
        .bind(tokens_used)
        .bind(error_message)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Recent calls for a post, newest first
    pub async fn find_by_reddit_id(reddit_id: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let logs = sqlx::query_as::<_, AiGenerationLog>(
            r#"
            SELECT * FROM ai_generation_logs
            WHERE reddit_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(reddit_id)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_carries_prompt_and_response_for_auditing() {
        let log = AiGenerationLog {
            id: Uuid::nil(),
            reddit_id: "abc123".into(),
            task: "caption_generation".into(),
            model: "claude-3-haiku-20240307".into(),
            prompt: "rewrite this post".into(),
            response: Some("{\"instagram_caption\": \"ig\"}".into()),
            success: true,
            tokens_used: 42,
            error_message: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["prompt"], "rewrite this post");
        assert_eq!(json["response"], "{\"instagram_caption\": \"ig\"}");
    }
}
