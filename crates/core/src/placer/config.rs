//! Configuration for the placer module.

use serde::{Deserialize, Serialize};

/// Configuration for the file system placer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacerConfig {
    /// Buffer size for cross-device copies in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Whether to create missing parent directories of the destination.
    #[serde(default = "default_true")]
    pub create_parents: bool,
}

fn default_buffer_size() -> usize {
    1024 * 1024 // 1 MB
}

fn default_true() -> bool {
    true
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            create_parents: default_true(),
        }
    }
}

impl PlacerConfig {
    /// Sets the copy buffer size.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets whether parent directories are created.
    pub fn with_create_parents(mut self, create: bool) -> Self {
        self.create_parents = create;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlacerConfig::default();
        assert_eq!(config.buffer_size, 1024 * 1024);
        assert!(config.create_parents);
    }

    #[test]
    fn test_config_builder() {
        let config = PlacerConfig::default()
            .with_buffer_size(4096)
            .with_create_parents(false);
        assert_eq!(config.buffer_size, 4096);
        assert!(!config.create_parents);
    }
}
