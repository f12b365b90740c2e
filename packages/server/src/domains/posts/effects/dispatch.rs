//! Hand-off to the extension relay.
//!
//! Dispatch is fire-and-forget: the request is spawned and the action
//! returns immediately. The relay gives no delivery guarantee and the
//! extension may never acknowledge; progress beyond queued_in_extension
//! only happens through ack callbacks.

use std::sync::Arc;

use anyhow::{Context, Result};
use extension_relay::models::QueuePostRequest;
use extension_relay::RelayService;
use tracing::{error, info};

use crate::domains::posts::models::Post;

/// Queue a post with the relay in a background task.
///
/// The post must already carry a tracking ID; callers assign one before
/// handing off so acknowledgements can be correlated.
pub fn dispatch_post(relay: Arc<RelayService>, post: &Post) -> Result<()> {
    let tracking_id = post
        .tracking_id
        .context("post has no tracking ID, cannot dispatch")?;

    let request = QueuePostRequest {
        tracking_id: tracking_id.to_string(),
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        scheduled_time: post.scheduled_time.map(|t| t.to_rfc3339()),
    };
    let post_id = post.id;

    tokio::spawn(async move {
        match relay.queue_post(&request).await {
            Ok(ack) => {
                info!(post_id = %post_id, tracking_id = %request.tracking_id, relay_status = %ack.status, "Post queued with relay");
            }
            Err(e) => {
                // No retry here: the post stays queued_in_extension and the
                // dashboard surfaces the stuck state to the user.
                error!(post_id = %post_id, tracking_id = %request.tracking_id, error = %e, "Relay dispatch failed");
            }
        }
    });

    Ok(())
}
