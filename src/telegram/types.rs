//! Telegram Bot API payloads.
//!
//! Only the fields the relay reads are modelled; serde ignores the rest.

use serde::Deserialize;

use crate::common::InboundEvent;

/// Envelope around every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// A getUpdates result item.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<Message>,
    pub channel_post: Option<Message>,
    pub edited_channel_post: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    /// Absent for media, stickers, service messages, etc.
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

/// Result of getMe.
#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

impl Update {
    /// Convert the first present of message, edited_message, channel_post
    /// and edited_channel_post into a relay event. `None` for updates
    /// without a message (callback queries, polls, member changes).
    pub fn into_event(self) -> Option<InboundEvent> {
        let message = self
            .message
            .or(self.edited_message)
            .or(self.channel_post)
            .or(self.edited_channel_post)?;

        Some(InboundEvent {
            chat_id: message.chat.id,
            chat_title: message.chat.display_name().map(str::to_string),
            text: message.text,
        })
    }
}

impl Chat {
    /// Group/channel title, or the user's handle or name for private chats.
    pub fn display_name(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.username.as_deref())
            .or(self.first_name.as_deref())
    }
}
