//! Relay dispatcher.
//!
//! Takes one inbound event at a time, applies chat scoping and the
//! message filter, and forwards surviving text to the outbound sink.
//! Each event is handled independently; nothing is kept between calls.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::common::error::WebhookResult;
use crate::common::{InboundEvent, OutboundPayload};
use crate::config::types::{normalize_chat_id, Config};

use super::filter::MessageFilter;

/// Destination for forwarded messages.
pub trait Sink: Send + Sync {
    fn deliver(&self, payload: &OutboundPayload) -> impl Future<Output = WebhookResult<()>> + Send;
}

/// Optional restriction to a single source chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    chat_id: Option<String>,
}

impl ScopeConfig {
    pub fn new(chat_id: Option<&str>) -> Self {
        Self {
            chat_id: chat_id.and_then(normalize_chat_id),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.telegram.source_chat_id.as_deref())
    }

    /// Whether events from `chat_id` should be processed.
    pub fn allows(&self, chat_id: i64) -> bool {
        match self.chat_id {
            Some(ref allowed) => *allowed == chat_id.to_string(),
            None => true,
        }
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }
}

/// Filters inbound events and forwards the rest to a sink.
pub struct RelayDispatcher<S> {
    filter: MessageFilter,
    scope: ScopeConfig,
    /// `None` disables forwarding entirely.
    sink: Option<S>,
}

impl<S: Sink> RelayDispatcher<S> {
    pub fn new(filter: MessageFilter, scope: ScopeConfig, sink: Option<S>) -> Self {
        Self {
            filter,
            scope,
            sink,
        }
    }

    /// Handle one inbound event.
    ///
    /// Never fails: delivery errors are logged and the event is dropped.
    pub async fn handle(&self, event: InboundEvent) {
        let Some(text) = event.text else {
            debug!(chat_id = event.chat_id, "Ignoring non-text message");
            return;
        };

        info!(
            chat_id = event.chat_id,
            title = event.chat_title.as_deref().unwrap_or("-"),
            "Message in chat"
        );

        if !self.scope.allows(event.chat_id) {
            debug!(chat_id = event.chat_id, "Chat outside configured scope");
            return;
        }

        if self.filter.should_block(&text) {
            debug!(
                chat_id = event.chat_id,
                pattern = self.filter.matching_pattern(&text).unwrap_or("<empty>"),
                "FILTERED Telegram -> Discord"
            );
            return;
        }

        let Some(ref sink) = self.sink else {
            debug!("No webhook configured, not forwarding");
            return;
        };

        let payload = OutboundPayload::new(&text);
        match sink.deliver(&payload).await {
            Ok(()) => info!(
                chat_id = event.chat_id,
                chars = payload.content().chars().count(),
                "Telegram -> Discord"
            ),
            Err(e) => warn!(chat_id = event.chat_id, "Failed to deliver to webhook: {}", e),
        }
    }
}
