//! Configuration loading and validation.
//!
//! The configuration is a TOML file with environment overrides prefixed with
//! `TICKETDL_` (nested keys separated by `__`, e.g. `TICKETDL_DOWNLOAD__ENABLED`).
//!
//! ```ignore
//! let config = load_config(Path::new("ticketdl.toml"))?;
//! validate_config(&config)?;
//! ```

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
pub use validate::validate_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
