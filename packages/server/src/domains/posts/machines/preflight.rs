//! Preflight validation gates
//!
//! Run before a post is handed to the extension relay. Validators never
//! panic and never stop at the first problem: every failing condition is
//! accumulated so the dashboard can show a complete checklist.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::posts::machines::can_post_now;
use crate::domains::posts::models::PostStatus;

/// Minimum trimmed content length for scheduling or posting.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Signatures of generation failures leaking into the post body: a raw
/// `"action"` key, an image-tool function call, or structured output where
/// prose should be.
const HALLUCINATION_MARKERS: [&str; 2] = ["\"action\"", "text2im"];

/// Validation input - the slice of a post record the gates care about.
///
/// `scheduled_time` stays a raw string here because "unparseable" is its own
/// failure, distinct from "absent" and "in the past". Callers validating a
/// schedule request pass the raw user input through untouched.
#[derive(Debug, Clone)]
pub struct PreflightPost {
    pub content: String,
    pub image_url: Option<String>,
    pub image_skipped: bool,
    pub scheduled_time: Option<String>,
    pub approved: bool,
    pub status: PostStatus,
}

/// Outcome of a preflight gate. `errors` is ordered and complete; an
/// invalid report always carries at least one message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PreflightReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl PreflightReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn content_is_too_short(content: &str) -> bool {
    content.trim().chars().count() < MIN_CONTENT_CHARS
}

/// Detect AI generation failures that leaked tool output into the body.
pub fn content_looks_hallucinated(content: &str) -> bool {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') {
        return true;
    }
    HALLUCINATION_MARKERS
        .iter()
        .any(|marker| content.contains(marker))
}

/// Full gate for scheduling a post. All conditions must hold simultaneously.
pub fn validate_for_scheduling(post: &PreflightPost) -> PreflightReport {
    validate_for_scheduling_at(post, Utc::now())
}

/// [`validate_for_scheduling`] against an explicit validation instant.
pub fn validate_for_scheduling_at(post: &PreflightPost, now: DateTime<Utc>) -> PreflightReport {
    let mut errors = Vec::new();

    if content_is_too_short(&post.content) {
        errors.push(format!(
            "Post content must be at least {} characters",
            MIN_CONTENT_CHARS
        ));
    }

    if content_looks_hallucinated(&post.content) {
        errors.push("AI hallucination detected in post content".to_string());
    }

    if post.image_url.is_none() && !post.image_skipped {
        errors.push("Post needs an image or the image must be explicitly skipped".to_string());
    }

    match post.scheduled_time.as_deref() {
        None => errors.push("Scheduled time is required".to_string()),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Err(_) => errors.push("Scheduled time is not a valid timestamp".to_string()),
            Ok(when) if when.with_timezone(&Utc) <= now => {
                errors.push("Scheduled time must be in the future".to_string());
            }
            Ok(_) => {}
        },
    }

    if !post.approved {
        errors.push("Post has not been approved".to_string());
    }

    if !matches!(
        post.status,
        PostStatus::Draft | PostStatus::Approved | PostStatus::Scheduled
    ) {
        errors.push(format!(
            "Post cannot be scheduled from status '{}'",
            post.status
        ));
    }

    PreflightReport::from_errors(errors)
}

/// Narrower gate for immediate posting.
///
/// Note: the hallucination check only runs in the scheduling gate. Whether
/// it should apply here too is an open product question; the observed
/// behavior is preserved rather than silently unified.
pub fn validate_for_post_now(post: &PreflightPost) -> PreflightReport {
    let mut errors = Vec::new();

    if content_is_too_short(&post.content) {
        errors.push(format!(
            "Post content must be at least {} characters",
            MIN_CONTENT_CHARS
        ));
    }

    if !post.approved {
        errors.push("Post has not been approved".to_string());
    }

    if !can_post_now(post.status, post.approved) {
        errors.push(format!(
            "Post cannot be posted immediately from status '{}'",
            post.status
        ));
    }

    PreflightReport::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ready_post(now: DateTime<Utc>) -> PreflightPost {
        PreflightPost {
            content: "Excited to announce our Q1 results and new product roadmap".to_string(),
            image_url: None,
            image_skipped: true,
            scheduled_time: Some((now + Duration::hours(1)).to_rfc3339()),
            approved: true,
            status: PostStatus::Approved,
        }
    }

    #[test]
    fn ready_post_passes_scheduling_gate() {
        let now = Utc::now();
        let report = validate_for_scheduling_at(&ready_post(now), now);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn hallucinated_body_is_rejected_even_when_otherwise_ready() {
        let now = Utc::now();
        let mut post = ready_post(now);
        post.content = r#"{"action": "generate_image", "prompt": "a sunrise over a city"}"#
            .to_string();

        let report = validate_for_scheduling_at(&post, now);
        assert!(!report.valid);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("hallucination")));
    }

    #[test]
    fn unparseable_and_past_times_are_distinct_failures() {
        let now = Utc::now();

        let mut post = ready_post(now);
        post.scheduled_time = Some("tomorrow at noon".to_string());
        let report = validate_for_scheduling_at(&post, now);
        assert_eq!(
            report.errors,
            vec!["Scheduled time is not a valid timestamp".to_string()]
        );

        post.scheduled_time = Some((now - Duration::hours(1)).to_rfc3339());
        let report = validate_for_scheduling_at(&post, now);
        assert_eq!(
            report.errors,
            vec!["Scheduled time must be in the future".to_string()]
        );
    }

    #[test]
    fn post_now_gate_does_not_run_hallucination_check() {
        let post = PreflightPost {
            content: r#"{"action": "generate_image"}"#.to_string(),
            image_url: None,
            image_skipped: false,
            scheduled_time: None,
            approved: true,
            status: PostStatus::Approved,
        };

        // Preserved asymmetry with the scheduling gate.
        let report = validate_for_post_now(&post);
        assert!(report.valid);
    }
}
