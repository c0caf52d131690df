//! `BrowserSession` over the W3C WebDriver wire protocol (chromedriver,
//! geckodriver, ...).

use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::{json, Value};

use super::{BrowserSession, ElementRef, Locator};
use crate::error::{PicError, PicResult};

/// Key under which WebDriver returns element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

pub struct WebDriverSession {
    agent: ureq::Agent,
    base_url: String,
    session_id: String,
}

impl WebDriverSession {
    /// Start a Chrome session against the driver at `server_url`. The browser
    /// profile lives in `profile_dir` so cookies and logins survive runs.
    pub fn start(server_url: &str, profile_dir: &Path) -> PicResult<Self> {
        std::fs::create_dir_all(profile_dir)?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .build();
        let base_url = server_url.trim_end_matches('/').to_string();

        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": [
                            format!("--user-data-dir={}", profile_dir.display()),
                            "--window-size=1280,1024",
                        ]
                    }
                }
            }
        });

        let value = send(&agent, "POST", &format!("{}/session", base_url), Some(capabilities))?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| PicError::Browser("WebDriver did not return a session id".into()))?
            .to_string();

        info!("Started browser session {} via {}", session_id, base_url);
        Ok(Self {
            agent,
            base_url,
            session_id,
        })
    }

    fn command(&self, method: &str, path: &str, body: Option<Value>) -> PicResult<Value> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        send(&self.agent, method, &url, body)
    }
}

impl BrowserSession for WebDriverSession {
    fn navigate(&mut self, url: &str) -> PicResult<()> {
        debug!("Navigating to {}", url);
        self.command("POST", "/url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn current_url(&mut self) -> PicResult<String> {
        let value = self.command("GET", "/url", None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn find_elements(&mut self, locator: &Locator) -> PicResult<Vec<ElementRef>> {
        let (using, selector) = strategy(locator);
        let value = self.command(
            "POST",
            "/elements",
            Some(json!({ "using": using, "value": selector })),
        )?;

        Ok(value
            .as_array()
            .map(|items| items.iter().filter_map(element_ref).collect())
            .unwrap_or_default())
    }

    fn attribute(&mut self, element: &ElementRef, name: &str) -> PicResult<Option<String>> {
        let value = self.command("GET", &format!("/element/{}/attribute/{}", element.0, name), None)?;
        Ok(value.as_str().map(str::to_string))
    }

    fn text(&mut self, element: &ElementRef) -> PicResult<String> {
        let value = self.command("GET", &format!("/element/{}/text", element.0), None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn click(&mut self, element: &ElementRef) -> PicResult<()> {
        self.command("POST", &format!("/element/{}/click", element.0), Some(json!({})))?;
        Ok(())
    }

    fn type_text(&mut self, element: &ElementRef, text: &str) -> PicResult<()> {
        self.command(
            "POST",
            &format!("/element/{}/value", element.0),
            Some(json!({ "text": text })),
        )?;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        match self.command("DELETE", "", None) {
            Ok(_) => debug!("Closed browser session {}", self.session_id),
            Err(e) => warn!("Could not close browser session {}: {}", self.session_id, e),
        }
    }
}

fn send(agent: &ureq::Agent, method: &str, url: &str, body: Option<Value>) -> PicResult<Value> {
    let request = agent.request(method, url);
    let result = match body {
        Some(body) => request.send_json(body),
        None => request.call(),
    };

    let json: Value = match result {
        Ok(resp) => resp.into_json()?,
        Err(ureq::Error::Status(code, resp)) => {
            let body: Value = resp.into_json().unwrap_or(Value::Null);
            return Err(PicError::Browser(error_message(code, &body)));
        }
        Err(ureq::Error::Transport(t)) => {
            return Err(PicError::Browser(format!("{} {} failed: {}", method, url, t)))
        }
    };

    Ok(json.get("value").cloned().unwrap_or(Value::Null))
}

fn strategy(locator: &Locator) -> (&'static str, String) {
    match locator {
        Locator::Css(selector) => ("css selector", selector.clone()),
        Locator::Tag(name) => ("tag name", name.clone()),
        Locator::Class(name) => ("css selector", format!(".{}", name)),
    }
}

fn element_ref(value: &Value) -> Option<ElementRef> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| ElementRef(id.to_string()))
}

fn error_message(status: u16, body: &Value) -> String {
    let error = body.pointer("/value/error").and_then(Value::as_str);
    let message = body.pointer("/value/message").and_then(Value::as_str);
    match (error, message) {
        (Some(error), Some(message)) => format!("{} (HTTP {}): {}", error, status, message),
        (Some(error), None) => format!("{} (HTTP {})", error, status),
        _ => format!("WebDriver returned HTTP {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_locator_becomes_css_selector() {
        assert_eq!(
            strategy(&Locator::class("pv-top-card")),
            ("css selector", ".pv-top-card".to_string())
        );
        assert_eq!(strategy(&Locator::tag("img")), ("tag name", "img".to_string()));
    }

    #[test]
    fn element_ref_reads_w3c_key() {
        let value = json!({ ELEMENT_KEY: "abc-123" });
        assert_eq!(element_ref(&value), Some(ElementRef("abc-123".into())));
        assert_eq!(element_ref(&json!({ "ELEMENT": "legacy" })), None);
    }

    #[test]
    fn error_message_includes_webdriver_error() {
        let body = json!({
            "value": { "error": "no such element", "message": "Unable to locate element" }
        });
        assert_eq!(
            error_message(404, &body),
            "no such element (HTTP 404): Unable to locate element"
        );
        assert_eq!(error_message(500, &Value::Null), "WebDriver returned HTTP 500");
    }
}
