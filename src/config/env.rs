//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `TG_BOT_TOKEN` - Telegram bot token
//! - `DISCORD_WEBHOOK_URL` - Discord webhook to forward to
//! - `TG_SOURCE_CHAT_ID` - Only relay messages from this chat
//!
//! Empty values are treated as unset.

use std::env;

use crate::config::types::{normalize_chat_id, Config};

pub const TOKEN_VAR: &str = "TG_BOT_TOKEN";
pub const WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";
pub const SOURCE_CHAT_ID_VAR: &str = "TG_SOURCE_CHAT_ID";

/// Environment variable holding the config file path.
pub const CONFIG_PATH_VAR: &str = "TGRELAY_CONFIG";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides using `lookup` to resolve variable names.
pub fn apply_overrides_from<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = lookup(TOKEN_VAR) {
        config.telegram.token = token.trim().to_string();
    }
    if let Some(url) = lookup(WEBHOOK_URL_VAR) {
        config.discord.webhook_url = Some(url.trim().to_string());
    }
    if let Some(chat_id) = lookup(SOURCE_CHAT_ID_VAR) {
        config.telegram.source_chat_id = normalize_chat_id(&chat_id);
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `TGRELAY_CONFIG`, otherwise returns "tgrelay.conf".
pub fn get_config_path() -> String {
    env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "tgrelay.conf".to_string())
}
