//! Request/response types for the posts HTTP edges

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{MemberId, PostId};
use crate::domains::posts::machines;
use crate::domains::posts::models::Post;

/// Create a new draft post
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPostInput {
    pub member_id: MemberId,
    pub content: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_skipped: bool,
}

/// Edit a draft or approved post
#[derive(Debug, Clone, Deserialize)]
pub struct EditPostInput {
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub image_skipped: Option<bool>,
}

/// Schedule a post for future dispatch.
///
/// `scheduled_time` is kept raw (RFC 3339) so preflight can report
/// unparseable input as its own validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulePostInput {
    pub scheduled_time: String,
}

/// Send a failed post back into the pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct RetryPostInput {
    /// "draft" (default) or "approved"
    pub to_status: Option<String>,
}

/// Acknowledgement callback from the browser extension, correlated by
/// tracking ID. Acks are asynchronous and may never arrive.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionAckInput {
    pub tracking_id: Uuid,
    pub status: String,
    pub error_message: Option<String>,
}

/// List filter for the dashboard
#[derive(Debug, Clone, Deserialize)]
pub struct ListPostsQuery {
    pub member_id: Option<MemberId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// API representation of a post, including the derived lifecycle hints the
/// dashboard renders (editable/deletable buttons, archive placement).
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub id: PostId,
    pub member_id: MemberId,
    pub content: String,
    pub content_hash: Option<String>,
    pub image_url: Option<String>,
    pub image_skipped: bool,
    pub status: String,
    pub approved: bool,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub tracking_id: Option<Uuid>,
    pub posted_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Derived lifecycle hints
    pub editable: bool,
    pub deletable: bool,
    pub archived: bool,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        // An unknown stored status renders with every action disabled
        // rather than failing the whole listing.
        let hints = post.current_status().ok();

        Self {
            editable: hints.map(machines::is_editable).unwrap_or(false),
            deletable: hints.map(machines::is_deletable).unwrap_or(false),
            archived: hints.map(machines::should_archive).unwrap_or(false),
            id: post.id,
            member_id: post.member_id,
            content: post.content,
            content_hash: post.content_hash,
            image_url: post.image_url,
            image_skipped: post.image_skipped,
            status: post.status,
            approved: post.approved,
            scheduled_time: post.scheduled_time,
            tracking_id: post.tracking_id,
            posted_at: post.posted_at,
            error_message: post.error_message,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
