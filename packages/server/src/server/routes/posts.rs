//! Post pipeline routes. Handlers are thin: parse input, call the action,
//! map the result. All legality decisions live in the lifecycle machine.

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::common::PostId;
use crate::domains::posts::actions::{self, PostActionError};
use crate::domains::posts::data::{
    EditPostInput, ListPostsQuery, PostData, RetryPostInput, SchedulePostInput, SubmitPostInput,
};
use crate::domains::posts::models::Post;
use crate::server::app::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub async fn submit_post_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<SubmitPostInput>,
) -> Result<(StatusCode, Json<PostData>), PostActionError> {
    let post = actions::submit_post(input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn list_posts_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostData>>, PostActionError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let posts = if let Some(status) = query.status.as_deref() {
        Post::find_by_status(status, limit, offset, &state.db_pool).await?
    } else if let Some(member_id) = query.member_id {
        Post::find_by_member(member_id, limit, offset, &state.db_pool).await?
    } else {
        Post::find_recent(limit, offset, &state.db_pool).await?
    };

    Ok(Json(posts.into_iter().map(PostData::from).collect()))
}

pub async fn get_post_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostData>, PostActionError> {
    let post = Post::find_by_id(PostId::from_uuid(id), &state.db_pool)
        .await?
        .ok_or(PostActionError::NotFound)?;
    Ok(Json(post.into()))
}

pub async fn edit_post_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EditPostInput>,
) -> Result<Json<PostData>, PostActionError> {
    let post = actions::edit_post(PostId::from_uuid(id), input, &state.db_pool).await?;
    Ok(Json(post.into()))
}

pub async fn delete_post_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PostActionError> {
    actions::delete_post(PostId::from_uuid(id), &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_post_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostData>, PostActionError> {
    let post = actions::approve_post(PostId::from_uuid(id), &state.db_pool).await?;
    Ok(Json(post.into()))
}

pub async fn schedule_post_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SchedulePostInput>,
) -> Result<Json<PostData>, PostActionError> {
    let post = actions::schedule_post(PostId::from_uuid(id), input, &state.db_pool).await?;
    Ok(Json(post.into()))
}

pub async fn post_now_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostData>, PostActionError> {
    let post =
        actions::post_now(PostId::from_uuid(id), &state.db_pool, state.relay.clone()).await?;
    Ok(Json(post.into()))
}

pub async fn retry_post_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<RetryPostInput>,
) -> Result<Json<PostData>, PostActionError> {
    let post = actions::retry_post(PostId::from_uuid(id), input, &state.db_pool).await?;
    Ok(Json(post.into()))
}
