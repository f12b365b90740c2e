// HTTP routes
pub mod extension;
pub mod health;
pub mod posts;

pub use extension::*;
pub use health::*;
pub use posts::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domains::posts::actions::PostActionError;

impl IntoResponse for PostActionError {
    fn into_response(self) -> Response {
        match self {
            PostActionError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "post not found" })),
            )
                .into_response(),

            // The full checklist goes to the client so the dashboard can
            // render every failing condition at once.
            PostActionError::Preflight(report) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(report)).into_response()
            }

            PostActionError::Transition(err) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": err.to_string(),
                    "allowed": err
                        .allowed
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>(),
                })),
            )
                .into_response(),

            PostActionError::InvalidState(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
            }

            PostActionError::DuplicateContent { existing_id } => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "content matches an already-published post",
                    "existing_post_id": existing_id.to_string(),
                })),
            )
                .into_response(),

            PostActionError::Other(e) => {
                tracing::error!(error = ?e, "Post action failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
