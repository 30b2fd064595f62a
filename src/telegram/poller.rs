//! Telegram long-poll client.
//!
//! Calls getUpdates in a loop and hands every message to the relay over
//! an mpsc channel. Poll failures back off with jitter and never end the
//! loop; only a closed channel does.

use std::time::Duration;

use backon::BackoffBuilder;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::common::error::{TelegramError, TelegramResult};
use crate::common::InboundEvent;
use crate::config::types::TelegramConfig;

use super::types::{ApiResponse, Update, User};

/// Create an exponential backoff iterator for poll failures.
/// 1s initial, 60s max, with jitter, unlimited retries.
fn poll_backoff() -> impl Iterator<Item = Duration> {
    backon::ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(60))
        .with_factor(2.0)
        .with_jitter()
        .without_max_times()
        .build()
}

/// Telegram Bot API client used for receiving updates.
pub struct TelegramPoller {
    client: Client,
    api_base: String,
    token: String,
    poll_timeout: u64,
}

impl TelegramPoller {
    pub fn new(config: &TelegramConfig) -> anyhow::Result<Self> {
        // Must outlive the server-side long-poll
        let client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout + 10))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            poll_timeout: config.poll_timeout,
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &'static str, query: &str) -> TelegramResult<T> {
        let url = format!("{}/bot{}/{}{}", self.api_base, self.token, method, query);
        // without_url keeps the token out of error messages
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.without_url())?;

        match serde_json::from_str::<ApiResponse<T>>(&body) {
            Ok(ApiResponse {
                ok: true,
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(response) => Err(TelegramError::Api {
                method,
                description: response
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
            Err(_) => Err(TelegramError::Status {
                method,
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Verify the token and return the bot's own user.
    pub async fn get_me(&self) -> TelegramResult<User> {
        self.call("getMe", "").await
    }

    /// Remove any webhook so getUpdates can be used, optionally discarding
    /// updates that queued up while the bot was offline.
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> TelegramResult<bool> {
        self.call(
            "deleteWebhook",
            &format!("?drop_pending_updates={}", drop_pending_updates),
        )
        .await
    }

    /// One long-poll round.
    pub async fn get_updates(&self, offset: Option<i64>) -> TelegramResult<Vec<Update>> {
        let query = match offset {
            Some(offset) => format!("?timeout={}&offset={}", self.poll_timeout, offset),
            None => format!("?timeout={}", self.poll_timeout),
        };
        self.call("getUpdates", &query).await
    }

    /// Poll forever, sending message events to `events_tx`.
    ///
    /// Returns when the receiving side of the channel is dropped.
    pub async fn run(&self, events_tx: mpsc::Sender<InboundEvent>) {
        info!("Starting getUpdates long-poll loop");
        let mut offset: Option<i64> = None;
        let mut backoff = poll_backoff();

        loop {
            match self.get_updates(offset).await {
                Ok(updates) => {
                    backoff = poll_backoff();
                    if !updates.is_empty() {
                        debug!(count = updates.len(), "Received updates");
                    }

                    for update in updates {
                        offset = offset.max(Some(update.update_id + 1));
                        let Some(event) = update.into_event() else {
                            continue;
                        };
                        if events_tx.send(event).await.is_err() {
                            info!("Relay channel closed, stopping poll loop");
                            return;
                        }
                    }
                }
                Err(e) => {
                    let delay = backoff.next().unwrap_or(Duration::from_secs(60));
                    warn!(
                        "getUpdates failed: {}. Retrying in {:.1} seconds...",
                        e,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
