//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use extension_relay::RelayService;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::routes::{
    acknowledge_extension_handler, approve_post_handler, delete_post_handler, edit_post_handler,
    get_post_handler, health_handler, list_posts_handler, post_now_handler, retry_post_handler,
    schedule_post_handler, submit_post_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub relay: Arc<RelayService>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/posts", post(submit_post_handler).get(list_posts_handler))
        .route(
            "/posts/:id",
            get(get_post_handler)
                .patch(edit_post_handler)
                .delete(delete_post_handler),
        )
        .route("/posts/:id/approve", post(approve_post_handler))
        .route("/posts/:id/schedule", post(schedule_post_handler))
        .route("/posts/:id/post-now", post(post_now_handler))
        .route("/posts/:id/retry", post(retry_post_handler))
        .route("/extension/ack", post(acknowledge_extension_handler))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
