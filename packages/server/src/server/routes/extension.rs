//! Callback edge for the browser extension.
//!
//! The extension reports progress asynchronously through the relay; acks
//! may arrive late, out of order, or never. Each ack is checked against the
//! lifecycle table before it is applied.

use axum::extract::Extension;
use axum::Json;

use crate::domains::posts::actions::{self, PostActionError};
use crate::domains::posts::data::{ExtensionAckInput, PostData};
use crate::server::app::AppState;

pub async fn acknowledge_extension_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<ExtensionAckInput>,
) -> Result<Json<PostData>, PostActionError> {
    let post = actions::acknowledge_extension(input, &state.db_pool).await?;
    Ok(Json(post.into()))
}
