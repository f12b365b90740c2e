use serde::{Deserialize, Serialize};

/// Payload handed to the relay for the browser extension to pick up.
///
/// `tracking_id` is the correlation token: the extension echoes it back in
/// acknowledgement callbacks so the server can match them to a post record.
#[derive(Debug, Clone, Serialize)]
pub struct QueuePostRequest {
    pub tracking_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

/// Relay response to a queue request.
///
/// This only confirms the relay accepted the message. It says nothing about
/// whether the extension will ever pick it up or post it.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueAck {
    pub status: String,
    #[serde(default)]
    pub queued_at: Option<String>,
}
