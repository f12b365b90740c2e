//! Unit tests for the preflight validation gates.

use chrono::{Duration, Utc};
use server_core::domains::posts::machines::preflight::{
    validate_for_post_now, validate_for_scheduling_at, PreflightPost,
};
use server_core::domains::posts::models::PostStatus;

fn schedulable_post() -> PreflightPost {
    PreflightPost {
        content: "Excited to announce our Q1 results and new product roadmap".to_string(),
        image_url: None,
        image_skipped: true,
        scheduled_time: Some((Utc::now() + Duration::hours(1)).to_rfc3339()),
        approved: true,
        status: PostStatus::Approved,
    }
}

#[test]
fn fully_prepared_post_passes_scheduling() {
    let report = validate_for_scheduling_at(&schedulable_post(), Utc::now());
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn image_url_satisfies_the_image_requirement_too() {
    let mut post = schedulable_post();
    post.image_skipped = false;
    post.image_url = Some("https://cdn.example.com/q1-chart.png".to_string());

    let report = validate_for_scheduling_at(&post, Utc::now());
    assert!(report.valid);
}

#[test]
fn every_failing_condition_is_reported_at_once() {
    let now = Utc::now();
    let post = PreflightPost {
        content: "hi".to_string(),
        image_url: None,
        image_skipped: false,
        scheduled_time: Some((now - Duration::days(1)).to_rfc3339()),
        approved: false,
        status: PostStatus::Posted,
    };

    let report = validate_for_scheduling_at(&post, now);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 5, "errors were: {:?}", report.errors);

    let all = report.errors.join("\n");
    assert!(all.contains("at least 10 characters"));
    assert!(all.contains("image"));
    assert!(all.contains("in the future"));
    assert!(all.contains("not been approved"));
    assert!(all.contains("status 'posted'"));

    // Ordered checklist: content problems come first.
    assert!(report.errors[0].contains("characters"));
}

#[test]
fn missing_and_unparseable_schedule_times_are_distinct() {
    let now = Utc::now();

    let mut post = schedulable_post();
    post.scheduled_time = None;
    let report = validate_for_scheduling_at(&post, now);
    assert_eq!(report.errors, vec!["Scheduled time is required".to_string()]);

    post.scheduled_time = Some("next tuesday".to_string());
    let report = validate_for_scheduling_at(&post, now);
    assert_eq!(
        report.errors,
        vec!["Scheduled time is not a valid timestamp".to_string()]
    );
}

#[test]
fn hallucinated_output_is_blocked_even_when_everything_else_passes() {
    let mut post = schedulable_post();
    post.content = r#"{"action": "generate_image", "prompt": "team celebrating"}"#.to_string();

    let report = validate_for_scheduling_at(&post, Utc::now());
    assert!(!report.valid);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("AI hallucination detected")));
}

#[test]
fn tool_call_fragments_count_as_hallucinations() {
    for body in [
        "Please call text2im with a sunrise over the skyline for this post",
        "Sure! Here it is: \"action\": publish the following content today",
    ] {
        let mut post = schedulable_post();
        post.content = body.to_string();
        let report = validate_for_scheduling_at(&post, Utc::now());
        assert!(!report.valid, "should reject: {}", body);
    }
}

#[test]
fn scheduling_is_limited_to_pre_dispatch_statuses() {
    for status in PostStatus::ALL {
        let mut post = schedulable_post();
        post.status = status;
        let report = validate_for_scheduling_at(&post, Utc::now());

        let eligible = matches!(
            status,
            PostStatus::Draft | PostStatus::Approved | PostStatus::Scheduled
        );
        assert_eq!(report.valid, eligible, "status {}", status);
        if !eligible {
            assert!(report.errors[0].contains(&status.to_string()));
        }
    }
}

#[test]
fn approved_draft_is_eligible_for_immediate_posting() {
    let post = PreflightPost {
        content: "Sharing a quick update on our hiring plans".to_string(),
        image_url: None,
        image_skipped: false,
        scheduled_time: None,
        approved: true,
        status: PostStatus::Draft,
    };

    let report = validate_for_post_now(&post);
    assert!(report.valid, "errors were: {:?}", report.errors);
}

#[test]
fn terminal_status_blocks_immediate_posting() {
    let mut post = schedulable_post();
    post.status = PostStatus::Posted;

    let report = validate_for_post_now(&post);
    assert!(!report.valid);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("status 'posted'")));
}

#[test]
fn immediate_posting_requires_approval_and_length() {
    let post = PreflightPost {
        content: "hi".to_string(),
        image_url: None,
        image_skipped: false,
        scheduled_time: None,
        approved: false,
        status: PostStatus::Draft,
    };

    let report = validate_for_post_now(&post);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 3, "errors were: {:?}", report.errors);
}
