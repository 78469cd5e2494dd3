//! Mock browser session for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

use crate::browser::{BrowserError, BrowserSession};
use crate::clock::Clock;

/// A download the mock serves when a matching URL is opened.
#[derive(Debug, Clone)]
struct ServedDownload {
    url_fragment: String,
    file_name: String,
}

/// Mock implementation of the BrowserSession trait.
///
/// Provides controllable behavior for testing:
/// - Serve per-page hyperlinks
/// - Simulate downloads by writing files into the download directory
/// - Record navigations and background opens for assertions
/// - Simulate failures
pub struct MockBrowser {
    download_dir: PathBuf,
    /// Stamps simulated downloads; real time when unset.
    clock: Option<Arc<dyn Clock>>,
    pages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    current_page: Arc<RwLock<Option<String>>>,
    downloads: Arc<RwLock<Vec<ServedDownload>>>,
    navigations: Arc<RwLock<Vec<String>>>,
    opened: Arc<RwLock<Vec<String>>>,
    failing_pages: Arc<RwLock<HashSet<String>>>,
    fail_opens: Arc<RwLock<bool>>,
    closed: Arc<RwLock<bool>>,
}

impl MockBrowser {
    /// Create a mock browser saving downloads into `download_dir`.
    pub fn new(download_dir: impl AsRef<Path>) -> Self {
        Self {
            download_dir: download_dir.as_ref().to_path_buf(),
            clock: None,
            pages: Arc::new(RwLock::new(HashMap::new())),
            current_page: Arc::new(RwLock::new(None)),
            downloads: Arc::new(RwLock::new(Vec::new())),
            navigations: Arc::new(RwLock::new(Vec::new())),
            opened: Arc::new(RwLock::new(Vec::new())),
            failing_pages: Arc::new(RwLock::new(HashSet::new())),
            fail_opens: Arc::new(RwLock::new(false)),
            closed: Arc::new(RwLock::new(false)),
        }
    }

    /// Stamp simulated downloads with `clock`'s time.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Hyperlinks rendered on `url`.
    pub async fn set_page(&self, url: &str, hyperlinks: Vec<String>) {
        self.pages.write().await.insert(url.to_string(), hyperlinks);
    }

    /// Opening a URL containing `url_fragment` saves `file_name`.
    ///
    /// The file content is the file name itself.
    pub async fn serve_download(&self, url_fragment: impl Into<String>, file_name: impl Into<String>) {
        self.downloads.write().await.push(ServedDownload {
            url_fragment: url_fragment.into(),
            file_name: file_name.into(),
        });
    }

    /// Make navigation to `url` fail.
    pub async fn fail_page(&self, url: &str) {
        self.failing_pages.write().await.insert(url.to_string());
    }

    /// Make background opens fail.
    pub async fn fail_opens(&self, fail: bool) {
        *self.fail_opens.write().await = fail;
    }

    /// URLs navigated to, in order.
    pub async fn navigations(&self) -> Vec<String> {
        self.navigations.read().await.clone()
    }

    /// URLs opened in the background, in order.
    pub async fn opened(&self) -> Vec<String> {
        self.opened.read().await.clone()
    }

    pub async fn is_closed(&self) -> bool {
        *self.closed.read().await
    }

    async fn ensure_open(&self) -> Result<(), BrowserError> {
        if *self.closed.read().await {
            return Err(BrowserError::SessionClosed);
        }
        Ok(())
    }

    fn write_download(&self, file_name: &str) -> Result<(), BrowserError> {
        let path = self.download_dir.join(file_name);
        let stamp = self
            .clock
            .as_ref()
            .map(|c| c.now())
            .unwrap_or_else(SystemTime::now);

        let write = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&path)?;
            file.write_all(file_name.as_bytes())?;
            file.set_modified(stamp)
        };
        write().map_err(|e| BrowserError::command("download failed", e.to_string()))
    }
}

#[async_trait]
impl BrowserSession for MockBrowser {
    fn name(&self) -> &str {
        "mock"
    }

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.ensure_open().await?;
        self.navigations.write().await.push(url.to_string());

        if self.failing_pages.read().await.contains(url) {
            return Err(BrowserError::command("unknown error", format!("cannot load {}", url)));
        }

        *self.current_page.write().await = Some(url.to_string());
        Ok(())
    }

    async fn open_in_background(&self, url: &str) -> Result<(), BrowserError> {
        self.ensure_open().await?;
        self.opened.write().await.push(url.to_string());

        if *self.fail_opens.read().await {
            return Err(BrowserError::command("javascript error", "window.open blocked"));
        }

        let served = self
            .downloads
            .read()
            .await
            .iter()
            .find(|d| url.contains(&d.url_fragment))
            .map(|d| d.file_name.clone());

        if let Some(file_name) = served {
            self.write_download(&file_name)?;
        }
        Ok(())
    }

    async fn hyperlinks(&self) -> Result<Vec<String>, BrowserError> {
        self.ensure_open().await?;
        let current = self.current_page.read().await.clone();
        let pages = self.pages.read().await;
        Ok(current
            .and_then(|url| pages.get(&url).cloned())
            .unwrap_or_default())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        *self.closed.write().await = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_serves_download_and_links() {
        let temp = TempDir::new().unwrap();
        let browser = MockBrowser::new(temp.path());
        browser
            .set_page("https://tracker/browse/T-1", vec!["https://x/gerrit/#/c/123456/".into()])
            .await;
        browser.serve_download("/changes/123456/", "patch.zip").await;

        browser.navigate("https://tracker/browse/T-1").await.unwrap();
        assert_eq!(browser.hyperlinks().await.unwrap().len(), 1);

        browser
            .open_in_background("https://x/gerrit/changes/123456/revisions/abc/patch?zip")
            .await
            .unwrap();
        assert!(temp.path().join("patch.zip").exists());

        browser.close().await.unwrap();
        assert!(browser.navigate("https://tracker/browse/T-2").await.is_err());
    }
}
