//! Unit tests for the post action decision seams: how scheduling requests,
//! extension acknowledgements, and retries map onto lifecycle transitions.

use server_core::domains::posts::actions::{
    plan_scheduling, resolve_ack, resolve_retry_target, AckOutcome, PostActionError, SchedulePlan,
};
use server_core::domains::posts::machines::preflight::{
    validate_for_scheduling_at, PreflightPost,
};
use server_core::domains::posts::models::PostStatus;
use server_core::domains::posts::models::PostStatus::*;

use chrono::{Duration, Utc};

#[test]
fn rescheduling_a_scheduled_post_is_an_in_place_update() {
    // The scheduling gate admits already-scheduled posts; moving the
    // timestamp must not be treated as a scheduled->scheduled edge.
    let now = Utc::now();
    let post = PreflightPost {
        content: "Pushing our launch announcement back by one week".to_string(),
        image_url: None,
        image_skipped: true,
        scheduled_time: Some((now + Duration::days(7)).to_rfc3339()),
        approved: true,
        status: Scheduled,
    };

    let report = validate_for_scheduling_at(&post, now);
    assert!(report.valid, "errors were: {:?}", report.errors);

    let plan = plan_scheduling(Scheduled).unwrap();
    assert_eq!(plan, SchedulePlan::Reschedule);
}

#[test]
fn approved_draft_steps_through_approved_when_scheduled() {
    assert_eq!(
        plan_scheduling(Draft).unwrap(),
        SchedulePlan::ApproveThenSchedule
    );
    assert_eq!(plan_scheduling(Approved).unwrap(), SchedulePlan::Schedule);
}

#[test]
fn scheduling_plans_reject_pipeline_and_terminal_statuses() {
    for status in [QueuedInExtension, Posting, Posted, Published, Failed] {
        let err = plan_scheduling(status).unwrap_err();
        assert_eq!(err.from, status);
        assert_eq!(err.to, Scheduled);
    }
}

#[test]
fn acks_walk_the_pipeline_one_step_at_a_time() {
    assert_eq!(
        resolve_ack(QueuedInExtension, Posting).unwrap(),
        AckOutcome::UpdateStatus
    );
    assert_eq!(resolve_ack(Posting, Posted).unwrap(), AckOutcome::MarkPosted);
    assert_eq!(
        resolve_ack(Posting, Published).unwrap(),
        AckOutcome::MarkPosted
    );
    assert_eq!(resolve_ack(Posting, Failed).unwrap(), AckOutcome::MarkFailed);
    assert_eq!(
        resolve_ack(QueuedInExtension, Failed).unwrap(),
        AckOutcome::MarkFailed
    );
}

#[test]
fn ack_that_skips_a_step_is_rejected_not_coerced() {
    // Extension claims success while the post is still queued.
    let err = resolve_ack(QueuedInExtension, Posted).unwrap_err();
    assert_eq!(err.from, QueuedInExtension);
    assert_eq!(err.to, Posted);

    // Late ack for a post that already reached a terminal state.
    assert!(resolve_ack(Posted, Posted).is_err());
    assert!(resolve_ack(Failed, Posting).is_err());
}

#[test]
fn retry_targets_are_draft_by_default_or_approved_explicitly() {
    assert_eq!(resolve_retry_target(None).unwrap(), PostStatus::Draft);
    assert_eq!(
        resolve_retry_target(Some("draft")).unwrap(),
        PostStatus::Draft
    );
    assert_eq!(
        resolve_retry_target(Some("approved")).unwrap(),
        PostStatus::Approved
    );

    let err = resolve_retry_target(Some("posting")).unwrap_err();
    assert!(matches!(err, PostActionError::InvalidState(_)));
    assert!(err.to_string().contains("posting"));
}
