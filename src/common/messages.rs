//! Canonical message types for relay communication.
//!
//! `InboundEvent` is what the Telegram side hands to the dispatcher;
//! `OutboundPayload` is what the dispatcher posts to the webhook.

use serde::Serialize;

/// Maximum number of characters forwarded to the webhook.
///
/// Discord rejects content over 2000 characters; the cut is made
/// below that and without any truncation marker.
pub const MAX_CONTENT_CHARS: usize = 1900;

/// A single received chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Originating Telegram chat id.
    pub chat_id: i64,
    /// Chat title, or a user name for private chats.
    pub chat_title: Option<String>,
    /// Message text. `None` for photos, stickers and other non-text content.
    pub text: Option<String>,
}

#[cfg(test)]
impl InboundEvent {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            chat_title: None,
            text: Some(text.into()),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.chat_title = Some(title.into());
        self
    }
}

/// Body of the webhook POST: `{"content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundPayload {
    content: String,
}

impl OutboundPayload {
    /// Build a payload, keeping at most [`MAX_CONTENT_CHARS`] characters.
    pub fn new(text: &str) -> Self {
        let content = match text.char_indices().nth(MAX_CONTENT_CHARS) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        };
        Self { content }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_kept_verbatim() {
        let payload = OutboundPayload::new("Hello, how are you?");
        assert_eq!(payload.content(), "Hello, how are you?");
    }

    #[test]
    fn test_long_text_is_hard_cut() {
        let text = "a".repeat(MAX_CONTENT_CHARS + 250);
        let payload = OutboundPayload::new(&text);
        assert_eq!(payload.content().len(), MAX_CONTENT_CHARS);
        assert_eq!(payload.content(), &text[..MAX_CONTENT_CHARS]);
    }

    #[test]
    fn test_exact_limit_not_cut() {
        let text = "b".repeat(MAX_CONTENT_CHARS);
        assert_eq!(OutboundPayload::new(&text).content(), text);
    }

    #[test]
    fn test_cut_counts_characters_not_bytes() {
        // Each 'é' is two bytes in UTF-8
        let text = "é".repeat(MAX_CONTENT_CHARS + 10);
        let payload = OutboundPayload::new(&text);
        assert_eq!(payload.content().chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_serializes_as_content_object() {
        let payload = OutboundPayload::new("hi \"there\"");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"content":"hi \"there\""}"#);
    }
}
