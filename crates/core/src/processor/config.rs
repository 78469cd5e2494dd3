//! Configuration for the processor module.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, OutputConfig, SystemsConfig, TrackerConfig};

/// What the issue processor needs from the configuration.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub output: OutputConfig,
    pub tracker: TrackerConfig,
    pub systems: SystemsConfig,
    /// Directory the browser saves into.
    pub download_dir: PathBuf,
    /// Pause after rendering the page and after triggering the document.
    pub settle_delay: Duration,
}

impl ProcessorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output: config.output.clone(),
            tracker: config.tracker.clone(),
            systems: config.systems.clone(),
            download_dir: config.download_dir(),
            settle_delay: config.download.settle_delay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_from_config() {
        let config = load_config_from_str(
            r#"
[output]
root = "/srv/tickets"
project = "phase2"

[tracker]
issue_base_url = "https://tracker.example.com/browse/"
document_base_url = "https://tracker.example.com/export/word/"

[download]
settle_delay_ms = 500
"#,
        )
        .unwrap();

        let processor_config = ProcessorConfig::from_config(&config);
        assert_eq!(processor_config.download_dir, PathBuf::from("/srv/tickets"));
        assert_eq!(processor_config.settle_delay, Duration::from_millis(500));
    }
}
