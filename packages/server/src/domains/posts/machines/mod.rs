//! Post lifecycle state machine
//!
//! Pure decision logic - NO IO, only state transitions and status queries.
//! Callers load the current status, ask this module whether an action is
//! allowed, and apply the verdict themselves. The machine holds no state and
//! is safe to call concurrently; it provides no locking, so callers must
//! serialize writes against the record store.

pub mod preflight;

use thiserror::Error;

use crate::domains::posts::models::PostStatus;

/// A transition outside the lifecycle graph.
///
/// Carries the attempted edge plus every legal next state so callers can
/// render an actionable message instead of a bare rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot transition post from '{from}' to '{to}' (allowed from '{from}': {})", format_allowed(.allowed))]
pub struct InvalidTransition {
    pub from: PostStatus,
    pub to: PostStatus,
    pub allowed: Vec<PostStatus>,
}

fn format_allowed(allowed: &[PostStatus]) -> String {
    if allowed.is_empty() {
        return "none, terminal state".to_string();
    }
    allowed
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Legal next states for each status.
///
/// Self-transitions for draft and approved are deliberate: re-saving a post
/// without changing its state is not an error. Posted and published have no
/// outgoing edges.
pub fn allowed_transitions(from: PostStatus) -> &'static [PostStatus] {
    use crate::domains::posts::models::PostStatus::*;
    match from {
        Draft => &[Draft, Approved],
        Approved => &[Approved, Scheduled, QueuedInExtension, Posting],
        Scheduled => &[QueuedInExtension, Failed, Draft],
        QueuedInExtension => &[Posting, Failed],
        Posting => &[Posted, Published, Failed],
        Posted => &[],
        Published => &[],
        Failed => &[Draft, Approved],
    }
}

/// Pure lookup against the transition table.
pub fn can_transition(from: PostStatus, to: PostStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Same check as [`can_transition`], but an illegal edge becomes an
/// [`InvalidTransition`] error.
pub fn require_transition(from: PostStatus, to: PostStatus) -> Result<(), InvalidTransition> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(InvalidTransition {
            from,
            to,
            allowed: allowed_transitions(from).to_vec(),
        })
    }
}

/// Content and image may still be changed.
pub fn is_editable(status: PostStatus) -> bool {
    matches!(status, PostStatus::Draft | PostStatus::Approved)
}

/// The post may be removed without losing pipeline history.
pub fn is_deletable(status: PostStatus) -> bool {
    matches!(
        status,
        PostStatus::Draft | PostStatus::Approved | PostStatus::Failed
    )
}

/// No further automatic progress will happen from this status.
pub fn is_terminal(status: PostStatus) -> bool {
    matches!(
        status,
        PostStatus::Posted | PostStatus::Published | PostStatus::Failed
    )
}

/// The extension currently owns the post.
pub fn is_processing(status: PostStatus) -> bool {
    matches!(
        status,
        PostStatus::QueuedInExtension | PostStatus::Posting
    )
}

/// Whether the post is eligible for immediate dispatch.
///
/// An approved draft is immediately postable without going through
/// scheduling first. That fast path is intentional, even though a draft
/// cannot be scheduled without approval either.
pub fn can_post_now(status: PostStatus, approved: bool) -> bool {
    approved
        && matches!(
            status,
            PostStatus::Approved | PostStatus::Scheduled | PostStatus::Draft
        )
}

/// Presentation hint: move the post out of active dashboard lists.
/// Not a state change.
pub fn should_archive(status: PostStatus) -> bool {
    matches!(status, PostStatus::Posted | PostStatus::Published)
}
