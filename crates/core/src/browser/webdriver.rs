//! W3C WebDriver browser session.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::config::BrowserConfig;
use super::error::BrowserError;
use super::traits::BrowserSession;

const OPEN_IN_BACKGROUND_SCRIPT: &str = "window.open(arguments[0], '_blank');";

const COLLECT_HREFS_SCRIPT: &str = "return Array.from(document.querySelectorAll('[href]')).map(\
     function (e) { return typeof e.href === 'string' ? e.href : e.getAttribute('href'); });";

/// Browser session driven through a WebDriver server such as geckodriver.
pub struct WebDriverSession {
    client: Client,
    base_url: String,
    session_id: RwLock<Option<String>>,
}

impl WebDriverSession {
    /// Starts a new browser session whose downloads land in `download_dir`.
    pub async fn connect(config: &BrowserConfig, download_dir: &Path) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config.webdriver_url.trim_end_matches('/').to_string();

        let body = json!({ "capabilities": Self::capabilities(config, download_dir) });
        let url = format!("{}/session", base_url);
        let response = client.post(&url).json(&body).send().await?;
        let status = response.status().as_u16();
        let payload: Value = response.json().await?;

        let value = Self::parse_response(status, payload).map_err(|e| match e {
            BrowserError::Command { error, message } => {
                BrowserError::SessionNotCreated(format!("{}: {}", error, message))
            }
            other => other,
        })?;
        let session_id = Self::parse_session_id(&value)?;

        info!(
            "Started {} session {} (downloads to {})",
            config.browser_name,
            session_id,
            download_dir.display()
        );

        Ok(Self {
            client,
            base_url,
            session_id: RwLock::new(Some(session_id)),
        })
    }

    /// Builds the `alwaysMatch` capabilities for the configured browser.
    fn capabilities(config: &BrowserConfig, download_dir: &Path) -> Value {
        let download_dir = download_dir.to_string_lossy().to_string();
        let auto_save = config.auto_save_mime_types.join(", ");

        let always_match = if config.browser_name.eq_ignore_ascii_case("chrome") {
            let mut args = Vec::new();
            if config.headless {
                args.push("--headless=new".to_string());
            }
            if let Some(profile) = &config.profile {
                args.push(format!("--user-data-dir={}", profile.display()));
            }
            json!({
                "browserName": "chrome",
                "goog:chromeOptions": {
                    "args": args,
                    "prefs": {
                        "download.default_directory": download_dir,
                        "download.prompt_for_download": false,
                        "download.directory_upgrade": true,
                    }
                }
            })
        } else {
            let mut args = Vec::new();
            if let Some(profile) = &config.profile {
                args.push("-profile".to_string());
                args.push(profile.to_string_lossy().to_string());
            }
            if config.headless {
                args.push("-headless".to_string());
            }
            json!({
                "browserName": config.browser_name,
                "moz:firefoxOptions": {
                    "args": args,
                    "prefs": {
                        "browser.download.folderList": 2,
                        "browser.download.dir": download_dir,
                        "browser.download.useDownloadDir": true,
                        "browser.download.manager.showWhenStarting": false,
                        "browser.helperApps.neverAsk.saveToDisk": auto_save,
                        "dom.webdriver.enabled": false,
                    }
                }
            })
        };

        json!({ "alwaysMatch": always_match })
    }

    /// Unwraps the `value` member of a WebDriver response, mapping error payloads.
    fn parse_response(status: u16, payload: Value) -> Result<Value, BrowserError> {
        let value = match payload {
            Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
            other => {
                return Err(BrowserError::InvalidResponse(format!(
                    "expected JSON object, got {}",
                    other
                )))
            }
        };

        if let Some(error) = value.get("error").and_then(Value::as_str) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(BrowserError::command(error, message));
        }

        if !(200..300).contains(&status) {
            return Err(BrowserError::command(
                format!("http {}", status),
                value.to_string(),
            ));
        }

        Ok(value)
    }

    fn parse_session_id(value: &Value) -> Result<String, BrowserError> {
        value
            .get("sessionId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BrowserError::InvalidResponse("missing sessionId".to_string()))
    }

    fn parse_hrefs(value: Value) -> Result<Vec<String>, BrowserError> {
        match value {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.is_empty() => Some(s),
                    _ => None,
                })
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(BrowserError::InvalidResponse(format!(
                "expected href array, got {}",
                other
            ))),
        }
    }

    async fn session_id(&self) -> Result<String, BrowserError> {
        self.session_id
            .read()
            .await
            .clone()
            .ok_or(BrowserError::SessionClosed)
    }

    /// Sends a session-scoped command and returns its `value`.
    async fn command(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Value, BrowserError> {
        let session_id = self.session_id().await?;
        let url = format!("{}/session/{}{}", self.base_url, session_id, endpoint);
        debug!("WebDriver {} {}", method, endpoint);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let payload: Value = response.json().await?;
        Self::parse_response(status, payload)
    }

    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        self.command(
            Method::POST,
            "/execute/sync",
            Some(json!({ "script": script, "args": args })),
        )
        .await
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    fn name(&self) -> &str {
        "webdriver"
    }

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn open_in_background(&self, url: &str) -> Result<(), BrowserError> {
        self.execute_script(OPEN_IN_BACKGROUND_SCRIPT, vec![json!(url)])
            .await?;
        Ok(())
    }

    async fn hyperlinks(&self) -> Result<Vec<String>, BrowserError> {
        let value = self.execute_script(COLLECT_HREFS_SCRIPT, Vec::new()).await?;
        Self::parse_hrefs(value)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        let taken = self.session_id.write().await.take();
        let session_id = match taken {
            Some(id) => id,
            None => return Ok(()),
        };

        let url = format!("{}/session/{}", self.base_url, session_id);
        match self.client.delete(&url).send().await {
            Ok(_) => {
                info!("Closed browser session {}", session_id);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to close browser session {}: {}", session_id, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_firefox_capabilities() {
        let config = BrowserConfig::default()
            .with_profile(PathBuf::from("/home/u/.mozilla/firefox/abc.default"))
            .with_headless(true);
        let caps = WebDriverSession::capabilities(&config, Path::new("/out/proj"));

        let options = &caps["alwaysMatch"]["moz:firefoxOptions"];
        assert_eq!(caps["alwaysMatch"]["browserName"], "firefox");
        assert_eq!(options["prefs"]["browser.download.dir"], "/out/proj");
        assert_eq!(options["prefs"]["browser.download.folderList"], 2);
        assert_eq!(
            options["args"],
            json!(["-profile", "/home/u/.mozilla/firefox/abc.default", "-headless"])
        );
        assert!(options["prefs"]["browser.helperApps.neverAsk.saveToDisk"]
            .as_str()
            .unwrap()
            .contains("application/zip"));
    }

    #[test]
    fn test_chrome_capabilities() {
        let config = BrowserConfig {
            browser_name: "chrome".to_string(),
            ..Default::default()
        };
        let caps = WebDriverSession::capabilities(&config, Path::new("/dl"));
        let options = &caps["alwaysMatch"]["goog:chromeOptions"];
        assert_eq!(options["prefs"]["download.default_directory"], "/dl");
        assert_eq!(options["args"], json!([]));
    }

    #[test]
    fn test_parse_new_session_response() {
        let payload = json!({
            "value": { "sessionId": "abc-123", "capabilities": { "browserName": "firefox" } }
        });
        let value = WebDriverSession::parse_response(200, payload).unwrap();
        assert_eq!(WebDriverSession::parse_session_id(&value).unwrap(), "abc-123");
    }

    #[test]
    fn test_parse_error_response() {
        let payload = json!({
            "value": { "error": "no such window", "message": "Browsing context has been discarded" }
        });
        let err = WebDriverSession::parse_response(404, payload).unwrap_err();
        match err {
            BrowserError::Command { error, message } => {
                assert_eq!(error, "no such window");
                assert!(message.contains("discarded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_success_status_without_error_body() {
        let err = WebDriverSession::parse_response(500, json!({ "value": null })).unwrap_err();
        assert!(matches!(err, BrowserError::Command { .. }));
    }

    #[test]
    fn test_parse_non_object_payload() {
        let err = WebDriverSession::parse_response(200, json!([1, 2])).unwrap_err();
        assert!(matches!(err, BrowserError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_hrefs() {
        let hrefs = WebDriverSession::parse_hrefs(json!([
            "https://x/gerrit/#/c/123456/",
            null,
            "",
            "https://t/browse/A-1"
        ]))
        .unwrap();
        assert_eq!(hrefs, vec!["https://x/gerrit/#/c/123456/", "https://t/browse/A-1"]);

        assert!(WebDriverSession::parse_hrefs(Value::Null).unwrap().is_empty());
        assert!(WebDriverSession::parse_hrefs(json!("nope")).is_err());
    }
}
