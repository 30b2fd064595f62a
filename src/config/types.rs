//! Configuration type definitions.

use serde::{Deserialize, Deserializer};

/// Default Telegram Bot API endpoint.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default long-poll timeout for getUpdates, in seconds.
pub const DEFAULT_POLL_TIMEOUT: u64 = 30;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    pub filters: Option<FiltersConfig>,
}

/// Telegram bot and polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token.
    #[serde(default)]
    pub token: String,
    /// Only relay messages from this chat when set.
    #[serde(default, deserialize_with = "deserialize_chat_id")]
    pub source_chat_id: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// getUpdates long-poll timeout in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
    /// Skip updates queued while the bot was offline.
    #[serde(default = "default_drop_pending_updates")]
    pub drop_pending_updates: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            source_chat_id: None,
            api_base: default_api_base(),
            poll_timeout: default_poll_timeout(),
            drop_pending_updates: default_drop_pending_updates(),
        }
    }
}

/// Discord webhook configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordConfig {
    /// Webhook URL. Forwarding is disabled when absent.
    pub webhook_url: Option<String>,
}

/// Message filtering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiltersConfig {
    /// Extra block patterns, applied on top of the built-in rules.
    pub block: Option<Vec<String>>,
}

impl Config {
    /// Extra block patterns from the `filters` section, if any.
    pub fn extra_block_patterns(&self) -> Vec<String> {
        self.filters
            .as_ref()
            .and_then(|f| f.block.clone())
            .unwrap_or_default()
    }
}

fn default_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

fn default_poll_timeout() -> u64 {
    DEFAULT_POLL_TIMEOUT
}

fn default_drop_pending_updates() -> bool {
    true
}

/// Accept the chat id as either a string or an integer.
fn deserialize_chat_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChatId {
        Int(i64),
        Str(String),
    }

    Ok(Option::<ChatId>::deserialize(deserializer)?.and_then(|id| match id {
        ChatId::Int(id) => Some(id.to_string()),
        ChatId::Str(s) => normalize_chat_id(&s),
    }))
}

/// Trim a configured chat id. A blank value means "no restriction" rather
/// than "reject every chat", which is what a whitespace-only id would do.
pub fn normalize_chat_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.telegram.token.is_empty());
        assert_eq!(config.telegram.api_base, DEFAULT_TELEGRAM_API_BASE);
        assert_eq!(config.telegram.poll_timeout, DEFAULT_POLL_TIMEOUT);
        assert!(config.telegram.drop_pending_updates);
        assert!(config.discord.webhook_url.is_none());
        assert!(config.extra_block_patterns().is_empty());
    }

    #[test]
    fn test_chat_id_from_integer_or_string() {
        let t: TelegramConfig =
            serde_json::from_str(r#"{"source_chat_id": -1001234567890}"#).unwrap();
        assert_eq!(t.source_chat_id.as_deref(), Some("-1001234567890"));

        let t: TelegramConfig =
            serde_json::from_str(r#"{"source_chat_id": "  -42 "}"#).unwrap();
        assert_eq!(t.source_chat_id.as_deref(), Some("-42"));

        let t: TelegramConfig = serde_json::from_str(r#"{"source_chat_id": "   "}"#).unwrap();
        assert!(t.source_chat_id.is_none());
    }

    #[test]
    fn test_normalize_chat_id() {
        assert_eq!(normalize_chat_id(" 123\n").as_deref(), Some("123"));
        assert_eq!(normalize_chat_id(""), None);
    }
}
