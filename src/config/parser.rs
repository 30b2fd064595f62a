//! Configuration file parsing (HOCON format).

use std::path::Path;

use hocon::HoconLoader;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a HOCON string.
#[cfg(test)]
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load the file at `path` if it exists, otherwise start from defaults.
///
/// The relay can run purely from environment variables, so a missing
/// file is not an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = load_config_str(
            r#"
            telegram {
                token = "123:abc"
                source_chat_id = "-100200300"
                poll_timeout = 20
                drop_pending_updates = false
            }
            discord {
                webhook_url = "https://discord.com/api/webhooks/1/xyz"
            }
            filters {
                block = ["(?i)free\\s+money", "t\\.me/"]
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.telegram.source_chat_id.as_deref(), Some("-100200300"));
        assert_eq!(config.telegram.poll_timeout, 20);
        assert!(!config.telegram.drop_pending_updates);
        assert_eq!(
            config.discord.webhook_url.as_deref(),
            Some("https://discord.com/api/webhooks/1/xyz")
        );
        assert_eq!(config.extra_block_patterns().len(), 2);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = load_config_str(r#"telegram { token = "t" }"#).unwrap();
        assert_eq!(config.telegram.token, "t");
        assert!(config.telegram.drop_pending_updates);
        assert!(config.discord.webhook_url.is_none());
        assert!(config.filters.is_none());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = load_config_or_default("/nonexistent/tgrelay.conf").unwrap();
        assert!(config.telegram.token.is_empty());
    }
}
