//! Download configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::watcher::WaitPolicy;

/// Configuration for patch downloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Enable/disable patch downloads.
    /// When disabled, only the primary document of each ticket is fetched.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Extension of the downloaded patch archives.
    #[serde(default = "default_extension")]
    pub artifact_extension: String,

    /// How often to scan the download directory (milliseconds).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Number of scans before a download is given up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Files older than this are never taken for a new download (seconds).
    #[serde(default = "default_recency_window")]
    pub recency_window_secs: u64,

    /// Pause after triggering a download and after placing it (milliseconds).
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// File name suffixes of in-progress downloads.
    #[serde(default = "default_partial_markers")]
    pub partial_markers: Vec<String>,

    /// Skip changes last updated after the ticket's creation date.
    #[serde(default)]
    pub date_gate: bool,
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "zip".to_string()
}

fn default_poll_interval() -> u64 {
    1000 // 1 second
}

fn default_max_attempts() -> u32 {
    30
}

fn default_recency_window() -> u64 {
    10
}

fn default_settle_delay() -> u64 {
    2000 // 2 seconds
}

fn default_partial_markers() -> Vec<String> {
    WaitPolicy::default().partial_markers
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            artifact_extension: default_extension(),
            poll_interval_ms: default_poll_interval(),
            max_attempts: default_max_attempts(),
            recency_window_secs: default_recency_window(),
            settle_delay_ms: default_settle_delay(),
            partial_markers: default_partial_markers(),
            date_gate: false,
        }
    }
}

impl DownloadConfig {
    /// Polling parameters for the artifact waiter.
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            extension: self.artifact_extension.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_attempts,
            recency_window: Duration::from_secs(self.recency_window_secs),
            partial_markers: self.partial_markers.clone(),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Sets the date gate.
    pub fn with_date_gate(mut self, enabled: bool) -> Self {
        self.date_gate = enabled;
        self
    }

    /// Sets the number of scans.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DownloadConfig::default();
        assert!(config.enabled);
        assert!(!config.date_gate);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.max_attempts, 30);
        assert_eq!(config.settle_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_deserialize_minimal() {
        let toml = r#"
            enabled = false
        "#;
        let config: DownloadConfig = toml::from_str(toml).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.artifact_extension, "zip");
        assert_eq!(config.recency_window_secs, 10);
    }

    #[test]
    fn test_wait_policy() {
        let toml = r#"
            artifact_extension = "tgz"
            poll_interval_ms = 250
            max_attempts = 8
            recency_window_secs = 5
            partial_markers = [".part"]
        "#;
        let config: DownloadConfig = toml::from_str(toml).unwrap();
        let policy = config.wait_policy();
        assert_eq!(policy.extension, "tgz");
        assert_eq!(policy.poll_interval, Duration::from_millis(250));
        assert_eq!(policy.max_attempts, 8);
        assert_eq!(policy.recency_window, Duration::from_secs(5));
        assert_eq!(policy.partial_markers, vec![".part"]);
    }
}
