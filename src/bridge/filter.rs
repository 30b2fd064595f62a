//! Message filtering with regex patterns.
//!
//! Blocks spam-like messages before they are relayed to Discord. A fixed
//! set of built-in rules is always active; extra patterns from the config
//! file are appended after them.

use fancy_regex::Regex;
use tracing::warn;

use crate::common::error::ConfigError;

/// Built-in block rules.
///
/// The `atm` rule matches the bare substring anywhere, including inside
/// words such as "treatment" or "batman".
pub const DEFAULT_BLOCK_PATTERNS: &[&str] = &[
    r"(?i)atm",
    r"(?i)accurate\s+signals",
    r"200%",
    r"(?i)\bbonus\b",
    r"(?i)\bperformance\b",
];

/// Message filter that checks messages against regex patterns.
#[derive(Debug, Clone)]
pub struct MessageFilter {
    patterns: Vec<CompiledPattern>,
}

/// A compiled regex pattern with its original string for debugging.
#[derive(Debug, Clone)]
struct CompiledPattern {
    original: String,
    regex: Regex,
}

impl MessageFilter {
    /// Create a filter from pattern strings.
    ///
    /// Fails on the first pattern that does not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile_pattern(p.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// The built-in rules followed by `extra`.
    pub fn with_defaults(extra: Vec<String>) -> Result<Self, ConfigError> {
        Self::new(
            DEFAULT_BLOCK_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .chain(extra),
        )
    }

    /// Check if a message should be blocked.
    ///
    /// Empty text is always blocked. Otherwise returns `true` if any
    /// pattern matches.
    pub fn should_block(&self, message: &str) -> bool {
        if message.is_empty() {
            return true;
        }

        self.patterns.iter().any(|p| {
            p.regex.is_match(message).unwrap_or_else(|e| {
                warn!("Regex match error for pattern '{}': {}", p.original, e);
                false
            })
        })
    }

    /// The pattern that blocks `message`, if any. Used for debug logging.
    pub fn matching_pattern(&self, message: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(message).unwrap_or(false))
            .map(|p| p.original.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

fn compile_pattern(pattern: String) -> Result<CompiledPattern, ConfigError> {
    match Regex::new(&pattern) {
        Ok(regex) => Ok(CompiledPattern {
            original: pattern,
            regex,
        }),
        Err(e) => Err(ConfigError::InvalidValue {
            field: "filters.block".to_string(),
            message: format!("invalid regex '{}': {}", pattern, e),
        }),
    }
}
