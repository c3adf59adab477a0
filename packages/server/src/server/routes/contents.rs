//! Review API: list, edit, approve, reject and publish processed content.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::media::models::MediaContent;
use crate::domains::processing::models::{ContentStatus, ProcessedContent};
use crate::domains::publishing::activities::publish_content;
use crate::domains::scraping::models::{RedditPost, RedditPostStatus};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

/// Processed content joined with its source post and media
#[derive(Debug, Serialize)]
pub struct ContentView {
    pub content: ProcessedContent,
    pub post: Option<RedditPost>,
    pub media: Option<MediaContent>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub instagram_caption: String,
    pub tiktok_caption: String,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub published: bool,
}

fn internal_error(e: anyhow::Error) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(error = %e, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

async fn load_view(
    content: ProcessedContent,
    state: &AppState,
) -> anyhow::Result<ContentView> {
    let post = RedditPost::find_by_id(&content.reddit_id, &state.db_pool).await?;
    let media = MediaContent::find_by_id(&content.reddit_id, &state.db_pool).await?;
    Ok(ContentView {
        content,
        post,
        media,
    })
}

/// GET /contents?status=pending_validation
pub async fn list_contents_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContentView>>, (StatusCode, Json<ErrorResponse>)> {
    let status = match params.status.as_deref() {
        Some(raw) => match ContentStatus::parse(raw) {
            Some(status) => status,
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("unknown status: {}", raw),
                    }),
                ))
            }
        },
        None => ContentStatus::PendingValidation,
    };

    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let contents = ProcessedContent::find_by_status(status, limit, &state.db_pool)
        .await
        .map_err(internal_error)?;

    let mut views = Vec::with_capacity(contents.len());
    for content in contents {
        views.push(load_view(content, &state).await.map_err(internal_error)?);
    }
    Ok(Json(views))
}

/// GET /contents/:reddit_id
pub async fn get_content_handler(
    Extension(state): Extension<AppState>,
    Path(reddit_id): Path<String>,
) -> Result<Json<ContentView>, (StatusCode, Json<ErrorResponse>)> {
    let content = ProcessedContent::find_by_id(&reddit_id, &state.db_pool)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("no content for {}", reddit_id),
                }),
            )
        })?;
    let view = load_view(content, &state).await.map_err(internal_error)?;
    Ok(Json(view))
}

/// PUT /contents/:reddit_id - edit captions before approval
pub async fn update_content_handler(
    Extension(state): Extension<AppState>,
    Path(reddit_id): Path<String>,
    Json(request): Json<UpdateContentRequest>,
) -> Result<Json<ProcessedContent>, (StatusCode, Json<ErrorResponse>)> {
    let content = ProcessedContent::update_captions(
        &reddit_id,
        &request.instagram_caption,
        &request.tiktok_caption,
        &state.db_pool,
    )
    .await
    .map_err(internal_error)?;
    Ok(Json(content))
}

async fn set_status(
    state: &AppState,
    reddit_id: &str,
    status: ContentStatus,
) -> Result<Json<ProcessedContent>, (StatusCode, Json<ErrorResponse>)> {
    let content = ProcessedContent::update_status(reddit_id, status, &state.db_pool)
        .await
        .map_err(internal_error)?;
    Ok(Json(content))
}

/// POST /contents/:reddit_id/approve
pub async fn approve_handler(
    Extension(state): Extension<AppState>,
    Path(reddit_id): Path<String>,
) -> Result<Json<ProcessedContent>, (StatusCode, Json<ErrorResponse>)> {
    set_status(&state, &reddit_id, ContentStatus::Validated).await
}

/// POST /contents/:reddit_id/reject
pub async fn reject_handler(
    Extension(state): Extension<AppState>,
    Path(reddit_id): Path<String>,
) -> Result<Json<ProcessedContent>, (StatusCode, Json<ErrorResponse>)> {
    set_status(&state, &reddit_id, ContentStatus::Rejected).await
}

/// Only reviewed-and-approved content may go out, even manually.
fn publishable(status: ContentStatus) -> bool {
    status == ContentStatus::Validated
}

/// POST /contents/:reddit_id/publish - publish a single validated post now
pub async fn publish_handler(
    Extension(state): Extension<AppState>,
    Path(reddit_id): Path<String>,
) -> Result<Json<PublishResponse>, (StatusCode, Json<ErrorResponse>)> {
    let content = ProcessedContent::find_by_id(&reddit_id, &state.db_pool)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("no content for {}", reddit_id),
                }),
            )
        })?;

    if !publishable(content.status) {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!(
                    "content is {}, only validated content can be published",
                    content.status.as_str()
                ),
            }),
        ));
    }

    let published = publish_content(&content, &state.deps)
        .await
        .map_err(internal_error)?;
    Ok(Json(PublishResponse { published }))
}

/// POST /contents/:reddit_id/reprocess - queue the source post for regeneration
pub async fn reprocess_handler(
    Extension(state): Extension<AppState>,
    Path(reddit_id): Path<String>,
) -> Result<Json<RedditPost>, (StatusCode, Json<ErrorResponse>)> {
    let post = RedditPost::find_by_id(&reddit_id, &state.db_pool)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("no post for {}", reddit_id),
                }),
            )
        })?;

    let post = RedditPost::update_status(
        &post.reddit_id,
        RedditPostStatus::PendingProcessing,
        &state.db_pool,
    )
    .await
    .map_err(internal_error)?;
    Ok(Json(post))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_publish_requires_validated_status() {
        assert!(publishable(ContentStatus::Validated));
        assert!(!publishable(ContentStatus::PendingValidation));
        assert!(!publishable(ContentStatus::Rejected));
        assert!(!publishable(ContentStatus::Published));
        assert!(!publishable(ContentStatus::Failed));
    }
}
