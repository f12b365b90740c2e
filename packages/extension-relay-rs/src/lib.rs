// Minimal client for the browser-extension relay.
//
// The relay is a dumb message queue the LinkedIn automation extension polls.
// Delivery is best-effort: a successful queue_post() only means the relay
// accepted the message, not that the extension will ever act on it.

pub mod models;

use reqwest::{header, Client};

use crate::models::{QueueAck, QueuePostRequest};

#[derive(Debug, Clone)]
pub struct RelayOptions {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct RelayService {
    options: RelayOptions,
    client: Client,
}

impl RelayService {
    pub fn new(options: RelayOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Queue a post for the extension to publish.
    pub async fn queue_post(&self, request: &QueuePostRequest) -> Result<QueueAck, &'static str> {
        let url = format!("{}/v1/queue", self.options.base_url.trim_end_matches('/'));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-Api-Key",
            self.options
                .api_key
                .parse()
                .map_err(|_| "Invalid relay API key")?,
        );

        let res = self
            .client
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Relay error ({}): {}", status, error_body);
                    return Err("Relay returned an error");
                }

                match response.json::<QueueAck>().await {
                    Ok(ack) => Ok(ack),
                    Err(e) => {
                        eprintln!("Failed to parse relay response: {}", e);
                        Err("Error parsing relay response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to relay failed: {}", e);
                Err("Error queuing post with relay")
            }
        }
    }

}
