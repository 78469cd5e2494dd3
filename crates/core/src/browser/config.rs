//! Configuration for the browser module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the WebDriver browser session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// WebDriver endpoint (e.g. a local geckodriver).
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Browser requested from the driver.
    #[serde(default = "default_browser_name")]
    pub browser_name: String,

    /// Directory the browser saves downloads into. Defaults to the output root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// Existing browser profile to reuse (keeps logged-in sessions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PathBuf>,

    /// Run without a visible window.
    #[serde(default)]
    pub headless: bool,

    /// Timeout for a single WebDriver command in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// MIME types saved without prompting.
    #[serde(default = "default_auto_save_types")]
    pub auto_save_mime_types: Vec<String>,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_browser_name() -> String {
    "firefox".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_auto_save_types() -> Vec<String> {
    vec![
        "application/zip".to_string(),
        "application/pdf".to_string(),
        "application/msword".to_string(),
        "application/octet-stream".to_string(),
    ]
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            browser_name: default_browser_name(),
            download_dir: None,
            profile: None,
            headless: false,
            timeout_secs: default_timeout(),
            auto_save_mime_types: default_auto_save_types(),
        }
    }
}

impl BrowserConfig {
    /// Sets the download directory.
    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = Some(dir);
        self
    }

    /// Sets the profile directory.
    pub fn with_profile(mut self, profile: PathBuf) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Enables or disables headless mode.
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.browser_name, "firefox");
        assert!(config.download_dir.is_none());
        assert!(!config.headless);
        assert!(config
            .auto_save_mime_types
            .contains(&"application/zip".to_string()));
    }

    #[test]
    fn test_deserialize_partial() {
        let toml = r#"
            webdriver_url = "http://127.0.0.1:9515"
            headless = true
        "#;
        let config: BrowserConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.webdriver_url, "http://127.0.0.1:9515");
        assert!(config.headless);
        assert_eq!(config.timeout_secs, 60);
    }
}
