//! Trait definitions for the browser module.

use async_trait::async_trait;

use super::error::BrowserError;

/// An interactive browser session.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Returns the name of this session implementation.
    fn name(&self) -> &str;

    /// Loads `url` in the current window and waits for the page to render.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Opens `url` in a new background window, leaving the current page intact.
    async fn open_in_background(&self, url: &str) -> Result<(), BrowserError>;

    /// Returns the `href` value of every element on the current page that has one.
    async fn hyperlinks(&self) -> Result<Vec<String>, BrowserError>;

    /// Ends the session.
    async fn close(&self) -> Result<(), BrowserError>;
}
