//! Discord webhook client.
//!
//! Posts `{"content": ...}` to a webhook URL. One attempt per message; the
//! response body is drained so the pooled connection can be reused.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use crate::bridge::Sink;
use crate::common::error::{WebhookError, WebhookResult};
use crate::common::OutboundPayload;

/// Webhook sink backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: Url,
}

impl WebhookClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: Url::parse(url)?,
        })
    }

    /// POST the payload and discard the response body.
    pub async fn post(&self, payload: &OutboundPayload) -> WebhookResult<()> {
        // The URL path carries the webhook token; keep it out of errors
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.without_url())?;

        if !status.is_success() {
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "Webhook accepted message");
        Ok(())
    }
}

impl Sink for WebhookClient {
    async fn deliver(&self, payload: &OutboundPayload) -> WebhookResult<()> {
        self.post(payload).await
    }
}
