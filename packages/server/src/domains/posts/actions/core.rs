use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use extension_relay::RelayService;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::common::utils::generate_content_hash;
use crate::common::PostId;
use crate::domains::posts::actions::PostActionError;
use crate::domains::posts::data::{
    EditPostInput, ExtensionAckInput, RetryPostInput, SchedulePostInput, SubmitPostInput,
};
use crate::domains::posts::effects::dispatch;
use crate::domains::posts::machines::{self, preflight};
use crate::domains::posts::machines::preflight::PreflightPost;
use crate::domains::posts::models::{Post, PostStatus};

/// Load a post and its parsed status, or fail with the right error kind.
async fn load(post_id: PostId, pool: &PgPool) -> Result<(Post, PostStatus), PostActionError> {
    let post = Post::find_by_id(post_id, pool)
        .await?
        .ok_or(PostActionError::NotFound)?;
    let status = post.current_status()?;
    Ok((post, status))
}

/// Project a post record into the preflight input shape.
///
/// `scheduled_override` carries raw user input from a schedule request so
/// that preflight sees exactly what the caller typed.
fn preflight_view(
    post: &Post,
    status: PostStatus,
    scheduled_override: Option<String>,
) -> PreflightPost {
    PreflightPost {
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        image_skipped: post.image_skipped,
        scheduled_time: scheduled_override
            .or_else(|| post.scheduled_time.map(|t| t.to_rfc3339())),
        approved: post.approved,
        status,
    }
}

/// Create a new draft post with its content fingerprint.
pub async fn submit_post(
    input: SubmitPostInput,
    pool: &PgPool,
) -> Result<Post, PostActionError> {
    info!(member_id = %input.member_id, "Submitting draft post");

    let hash = generate_content_hash(&input.content);
    let post = Post::create(
        input.member_id,
        input.content,
        hash,
        input.image_url,
        input.image_skipped,
        pool,
    )
    .await?;

    Ok(post)
}

/// Edit content/image fields of a draft or approved post.
pub async fn edit_post(
    post_id: PostId,
    input: EditPostInput,
    pool: &PgPool,
) -> Result<Post, PostActionError> {
    let (_, status) = load(post_id, pool).await?;

    if !machines::is_editable(status) {
        return Err(PostActionError::InvalidState(format!(
            "Post cannot be edited in status '{}'",
            status
        )));
    }

    let content_hash = input
        .content
        .as_deref()
        .map(generate_content_hash);

    let post = Post::update_content(
        post_id,
        input.content,
        content_hash,
        input.image_url,
        input.image_skipped,
        pool,
    )
    .await?;

    Ok(post)
}

/// Human sign-off: set the approved flag and move the post to approved.
pub async fn approve_post(post_id: PostId, pool: &PgPool) -> Result<Post, PostActionError> {
    let (_, status) = load(post_id, pool).await?;

    info!(post_id = %post_id, from = %status, "Approving post");

    machines::require_transition(status, PostStatus::Approved)?;
    let post = Post::mark_approved(post_id, pool).await?;

    Ok(post)
}

/// How a scheduling request reaches the scheduled state from a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePlan {
    /// Approved draft: step through 'approved' first, then schedule.
    /// Draft has no direct edge to 'scheduled'.
    ApproveThenSchedule,
    /// Regular approved -> scheduled transition.
    Schedule,
    /// Already scheduled: an in-place timestamp update, not a transition.
    Reschedule,
}

/// Decide how (and whether) a post can move to the scheduled state.
///
/// Rescheduling an already-scheduled post is legal - the scheduling gate
/// admits it - and is an in-place update rather than a scheduled->scheduled
/// edge, which the lifecycle table does not have.
pub fn plan_scheduling(status: PostStatus) -> Result<SchedulePlan, machines::InvalidTransition> {
    match status {
        PostStatus::Scheduled => Ok(SchedulePlan::Reschedule),
        PostStatus::Draft => {
            machines::require_transition(PostStatus::Draft, PostStatus::Approved)?;
            machines::require_transition(PostStatus::Approved, PostStatus::Scheduled)?;
            Ok(SchedulePlan::ApproveThenSchedule)
        }
        other => {
            machines::require_transition(other, PostStatus::Scheduled)?;
            Ok(SchedulePlan::Schedule)
        }
    }
}

/// Schedule a post for future dispatch. Runs the full preflight gate; the
/// complete error checklist is returned to the caller on failure.
pub async fn schedule_post(
    post_id: PostId,
    input: SchedulePostInput,
    pool: &PgPool,
) -> Result<Post, PostActionError> {
    let (post, status) = load(post_id, pool).await?;

    let report = preflight::validate_for_scheduling(&preflight_view(
        &post,
        status,
        Some(input.scheduled_time.clone()),
    ));
    if !report.valid {
        return Err(PostActionError::Preflight(report));
    }

    if plan_scheduling(status)? == SchedulePlan::ApproveThenSchedule {
        Post::mark_approved(post_id, pool).await?;
    }

    // Preflight already proved this parses and lies in the future.
    let when = DateTime::parse_from_rfc3339(&input.scheduled_time)
        .map_err(|e| anyhow::anyhow!("scheduled_time became unparseable: {}", e))?
        .with_timezone(&Utc);

    info!(post_id = %post_id, scheduled_time = %when, "Scheduling post");
    let post = Post::set_schedule(post_id, when, pool).await?;

    Ok(post)
}

/// Immediately hand a post to the extension, bypassing scheduling.
pub async fn post_now(
    post_id: PostId,
    pool: &PgPool,
    relay: Arc<RelayService>,
) -> Result<Post, PostActionError> {
    let (post, status) = load(post_id, pool).await?;

    let report = preflight::validate_for_post_now(&preflight_view(&post, status, None));
    if !report.valid {
        return Err(PostActionError::Preflight(report));
    }

    if let Some(hash) = post.content_hash.as_deref() {
        if let Some(existing) =
            Post::find_posted_duplicate(post.member_id, hash, post.id, pool).await?
        {
            return Err(PostActionError::DuplicateContent {
                existing_id: existing.id,
            });
        }
    }

    // Approved-draft fast path: step through 'approved' before queueing.
    let status = if status == PostStatus::Draft {
        machines::require_transition(status, PostStatus::Approved)?;
        Post::mark_approved(post_id, pool).await?;
        PostStatus::Approved
    } else {
        status
    };

    info!(post_id = %post_id, "Posting now");
    hand_off_to_extension(post_id, status, pool, relay).await
}

/// Move due scheduled posts into the extension queue. Called from the
/// dispatch interval task. Failures are logged per post; one bad record
/// does not stall the rest.
pub async fn dispatch_due_posts(
    pool: &PgPool,
    relay: Arc<RelayService>,
) -> Result<usize, PostActionError> {
    let due = Post::find_due_for_dispatch(Utc::now(), pool).await?;
    let mut dispatched = 0;

    for post in due {
        let status = match post.current_status() {
            Ok(status) => status,
            Err(e) => {
                warn!(post_id = %post.id, error = %e, "Skipping due post with unknown status");
                continue;
            }
        };

        match hand_off_to_extension(post.id, status, pool, relay.clone()).await {
            Ok(_) => dispatched += 1,
            Err(e) => {
                warn!(post_id = %post.id, error = %e, "Failed to dispatch due post");
            }
        }
    }

    if dispatched > 0 {
        info!(count = dispatched, "Dispatched due posts to extension");
    }
    Ok(dispatched)
}

/// Queue a post in the extension: transition check, tracking ID, status
/// write, then fire-and-forget relay dispatch.
async fn hand_off_to_extension(
    post_id: PostId,
    status: PostStatus,
    pool: &PgPool,
    relay: Arc<RelayService>,
) -> Result<Post, PostActionError> {
    machines::require_transition(status, PostStatus::QueuedInExtension)?;

    // Tracking ID must exist before dispatch so acks can be correlated.
    Post::ensure_tracking_id(post_id, pool).await?;
    let post =
        Post::update_status(post_id, &PostStatus::QueuedInExtension.to_string(), pool).await?;

    dispatch::dispatch_post(relay, &post)?;

    Ok(post)
}

/// Record write an acknowledged status maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// Terminal success: stamp posted_at, clear any error.
    MarkPosted,
    /// Terminal failure: record the extension's reason.
    MarkFailed,
    /// Intermediate progress (queued -> posting): plain status write.
    UpdateStatus,
}

/// Validate an extension acknowledgement against the lifecycle table and
/// decide which write it maps to.
///
/// An ack that skips a step (e.g. posted while still queued) is rejected,
/// never coerced.
pub fn resolve_ack(
    current: PostStatus,
    ack: PostStatus,
) -> Result<AckOutcome, machines::InvalidTransition> {
    machines::require_transition(current, ack)?;
    Ok(match ack {
        PostStatus::Posted | PostStatus::Published => AckOutcome::MarkPosted,
        PostStatus::Failed => AckOutcome::MarkFailed,
        _ => AckOutcome::UpdateStatus,
    })
}

/// Apply an extension acknowledgement to the matching post.
pub async fn acknowledge_extension(
    input: ExtensionAckInput,
    pool: &PgPool,
) -> Result<Post, PostActionError> {
    let post = Post::find_by_tracking_id(input.tracking_id, pool)
        .await?
        .ok_or_else(|| {
            warn!(tracking_id = %input.tracking_id, "Ack for unknown tracking ID");
            PostActionError::NotFound
        })?;
    let status = post.current_status()?;
    let ack_status = PostStatus::from_str(&input.status)
        .map_err(|e| PostActionError::InvalidState(e.to_string()))?;

    let outcome = resolve_ack(status, ack_status)?;

    info!(post_id = %post.id, from = %status, to = %ack_status, "Extension ack");

    let post = match outcome {
        AckOutcome::MarkPosted => {
            Post::mark_posted(post.id, &ack_status.to_string(), pool).await?
        }
        AckOutcome::MarkFailed => {
            let reason = input
                .error_message
                .unwrap_or_else(|| "Extension reported failure without details".to_string());
            Post::mark_failed(post.id, &reason, pool).await?
        }
        AckOutcome::UpdateStatus => {
            Post::update_status(post.id, &ack_status.to_string(), pool).await?
        }
    };

    Ok(post)
}

/// Parse the requested retry target. Only draft (the default) and approved
/// are valid re-entry points into the pipeline.
pub fn resolve_retry_target(requested: Option<&str>) -> Result<PostStatus, PostActionError> {
    match requested {
        None | Some("draft") => Ok(PostStatus::Draft),
        Some("approved") => Ok(PostStatus::Approved),
        Some(other) => Err(PostActionError::InvalidState(format!(
            "Retry target must be 'draft' or 'approved', got '{}'",
            other
        ))),
    }
}

/// Send a failed post back to draft (default) or approved for another try.
/// Retrying is always an explicit request, never automatic.
pub async fn retry_post(
    post_id: PostId,
    input: RetryPostInput,
    pool: &PgPool,
) -> Result<Post, PostActionError> {
    let (_, status) = load(post_id, pool).await?;

    let target = resolve_retry_target(input.to_status.as_deref())?;

    machines::require_transition(status, target)?;

    info!(post_id = %post_id, target = %target, "Retrying failed post");
    let post = Post::update_status(post_id, &target.to_string(), pool).await?;

    Ok(post)
}

/// Delete a post if its status allows it.
pub async fn delete_post(post_id: PostId, pool: &PgPool) -> Result<(), PostActionError> {
    let (_, status) = load(post_id, pool).await?;

    if !machines::is_deletable(status) {
        return Err(PostActionError::InvalidState(format!(
            "Post cannot be deleted in status '{}'",
            status
        )));
    }

    info!(post_id = %post_id, "Deleting post");
    Post::delete(post_id, pool).await?;

    Ok(())
}
