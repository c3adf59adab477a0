//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::PipelineDeps;
use crate::server::routes::{
    approve_handler, get_content_handler, health_handler, list_contents_handler, publish_handler,
    reject_handler, reprocess_handler, update_content_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<PipelineDeps>,
}

/// Build the Axum application router for the review API
pub fn build_app(pool: PgPool, config: Config) -> Router {
    let deps = Arc::new(PipelineDeps::new(pool.clone(), config));

    let app_state = AppState {
        db_pool: pool,
        deps,
    };

    // CORS configuration - review UI runs on a different origin in dev
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/contents", get(list_contents_handler))
        .route("/contents/:reddit_id", get(get_content_handler))
        .route("/contents/:reddit_id", put(update_content_handler))
        .route("/contents/:reddit_id/approve", post(approve_handler))
        .route("/contents/:reddit_id/reject", post(reject_handler))
        .route("/contents/:reddit_id/reprocess", post(reprocess_handler))
        .route("/contents/:reddit_id/publish", post(publish_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
