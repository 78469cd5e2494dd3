//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of every external collaborator,
//! allowing the whole ticket pipeline to run without a browser, a review
//! server, or a document converter.
//!
//! # Example
//!
//! ```rust,ignore
//! use ticketdl_core::testing::{CannedChange, ManualClock, MockBrowser, MockQueryClient};
//!
//! let clock = Arc::new(ManualClock::new(SystemTime::now()));
//! let browser = MockBrowser::new(&download_dir).with_clock(clock.clone());
//! let queries = MockQueryClient::new();
//!
//! // Configure mock responses
//! browser.set_page("https://tracker/browse/T-1", vec!["https://x/gerrit/#/c/123456/".into()]).await;
//! browser.serve_download("/changes/123456/", "patch.zip").await;
//! queries.set_change("10.0.0.1", "123456", CannedChange::merged("abc123")).await;
//! ```

mod manual_clock;
mod mock_browser;
mod mock_pdf_converter;
mod mock_query_client;

pub use manual_clock::ManualClock;
pub use mock_browser::MockBrowser;
pub use mock_pdf_converter::MockPdfConverter;
pub use mock_query_client::{CannedChange, MockQueryClient};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{SystemEndpoint, UrlShape};

    /// An endpoint with reasonable defaults for `host`.
    pub fn endpoint(host: &str, url_shape: UrlShape) -> SystemEndpoint {
        SystemEndpoint {
            host: host.to_string(),
            ssh_user: "builder".to_string(),
            ssh_port: None,
            web_base: format!("http://{}/gerrit", host),
            url_shape,
        }
    }

    /// A P-class link to `id`.
    pub fn p_link(id: &str) -> String {
        format!("https://review.example.com/gerrit/#/c/{}/", id)
    }

    /// A Q-class link to `id`.
    pub fn q_link(id: &str) -> String {
        format!("http://10.0.0.2/gerrit/{}/3", id)
    }

    /// An EP2-class link to `id`.
    pub fn ep2_link(id: &str) -> String {
        format!("http://10.0.0.3/#/c/{}/", id)
    }
}
