//! Error types for the browser module.

use thiserror::Error;

/// Errors that can occur while driving the browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Could not reach the WebDriver endpoint.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The driver refused to create a session.
    #[error("Session not created: {0}")]
    SessionNotCreated(String),

    /// The session has already been closed.
    #[error("Session closed")]
    SessionClosed,

    /// The driver reported an error for a command.
    #[error("WebDriver error {error}: {message}")]
    Command { error: String, message: String },

    /// The driver answered with something we could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,
}

impl BrowserError {
    /// Creates a command error from the driver's error code and message.
    pub fn command(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for BrowserError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BrowserError::Timeout
        } else if e.is_connect() {
            BrowserError::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            BrowserError::InvalidResponse(e.to_string())
        } else {
            BrowserError::ConnectionFailed(e.to_string())
        }
    }
}
