//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use std::path::Path;

use crate::common::error::ConfigError;

pub use parser::load_config_or_default;
pub use types::*;
pub use validate::validate_config;

/// Load the config file (if present), apply environment overrides, and validate.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config = env::apply_env_overrides(load_config_or_default(path)?);
    validate_config(&config)?;
    Ok(config)
}
