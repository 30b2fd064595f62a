//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use fancy_regex::Regex;
use reqwest::Url;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Telegram caps the getUpdates long-poll timeout at 50 seconds.
const MAX_POLL_TIMEOUT: u64 = 50;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.telegram.token.is_empty() {
        return Err(ConfigError::MissingField {
            field: "telegram.token (or TG_BOT_TOKEN)".to_string(),
        });
    }

    let mut errors = Vec::new();

    if config.telegram.token == "YOUR_BOT_TOKEN_HERE" {
        errors.push("telegram.token has not been configured (still using placeholder)".to_string());
    }
    if config.telegram.token.chars().any(char::is_whitespace) {
        errors.push("telegram.token must not contain whitespace".to_string());
    }
    if config.telegram.poll_timeout == 0 || config.telegram.poll_timeout > MAX_POLL_TIMEOUT {
        errors.push(format!(
            "telegram.poll_timeout must be 1-{} seconds (got {})",
            MAX_POLL_TIMEOUT, config.telegram.poll_timeout
        ));
    }
    if let Err(e) = Url::parse(&config.telegram.api_base) {
        errors.push(format!(
            "telegram.api_base '{}' is not a valid URL: {}",
            config.telegram.api_base, e
        ));
    }

    if let Some(ref url) = config.discord.webhook_url {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(format!(
                "discord.webhook_url must use http or https (got '{}')",
                parsed.scheme()
            )),
            Err(e) => errors.push(format!("discord.webhook_url is not a valid URL: {}", e)),
        }
    }

    for (i, pattern) in config.extra_block_patterns().iter().enumerate() {
        if Regex::new(pattern).is_err() {
            errors.push(format!(
                "filters.block[{}] is not a valid regex: '{}'",
                i, pattern
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn make_valid_config() -> Config {
        Config {
            telegram: TelegramConfig {
                token: "123456:ABC-DEF".to_string(),
                source_chat_id: Some("-100123".to_string()),
                ..TelegramConfig::default()
            },
            discord: DiscordConfig {
                webhook_url: Some("https://discord.com/api/webhooks/1/token".to_string()),
            },
            filters: None,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&make_valid_config()).is_ok());
    }

    #[test]
    fn test_missing_webhook_is_allowed() {
        let mut config = make_valid_config();
        config.discord.webhook_url = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_token_is_missing_field() {
        let mut config = make_valid_config();
        config.telegram.token = String::new();

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
        assert!(err.to_string().contains("TG_BOT_TOKEN"));
    }

    #[test]
    fn test_placeholder_token_fails() {
        let mut config = make_valid_config();
        config.telegram.token = "YOUR_BOT_TOKEN_HERE".to_string();

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("placeholder"));
    }

    #[test]
    fn test_bad_webhook_url_fails() {
        let mut config = make_valid_config();
        config.discord.webhook_url = Some("not a url".to_string());
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("discord.webhook_url"));

        config.discord.webhook_url = Some("ftp://example.com/hook".to_string());
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("http or https"));
    }

    #[test]
    fn test_poll_timeout_range() {
        let mut config = make_valid_config();
        config.telegram.poll_timeout = 0;
        assert!(validate_config(&config).is_err());

        config.telegram.poll_timeout = 51;
        assert!(validate_config(&config).is_err());

        config.telegram.poll_timeout = 50;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_regex_filter_fails() {
        let mut config = make_valid_config();
        config.filters = Some(FiltersConfig {
            block: Some(vec!["ok".to_string(), "[invalid".to_string()]),
        });

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("filters.block[1]"));
        assert!(err.contains("not a valid regex"));
    }

    #[test]
    fn test_errors_are_collected() {
        let mut config = make_valid_config();
        config.telegram.poll_timeout = 0;
        config.discord.webhook_url = Some("nope".to_string());

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("poll_timeout"));
        assert!(err.contains("webhook_url"));
    }
}
