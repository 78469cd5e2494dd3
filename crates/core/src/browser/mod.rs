//! Browser session abstraction.
//!
//! The pipeline needs three things from a browser: render a page, open a URL
//! in a background window (which is how downloads are triggered), and list the
//! hyperlinks of the current page. [`BrowserSession`] captures exactly that;
//! [`WebDriverSession`] implements it over the W3C WebDriver protocol.

mod config;
mod error;
mod traits;
mod webdriver;

pub use config::BrowserConfig;
pub use error::BrowserError;
pub use traits::BrowserSession;
pub use webdriver::WebDriverSession;
