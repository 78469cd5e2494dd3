//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for document conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Conversion binary, either a bare name looked up on `PATH` or a path.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Timeout for a single conversion in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Pause after the document has been handled, in milliseconds.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

fn default_binary() -> PathBuf {
    PathBuf::from("libreoffice")
}

fn default_timeout() -> u64 {
    60
}

fn default_settle_delay() -> u64 {
    2000
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_secs: default_timeout(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

impl ConverterConfig {
    /// Sets the conversion binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
