//! Minimal W3C WebDriver client.
//!
//! Only the commands the login flow needs are implemented. Every response is a
//! JSON object with a `value` field; failures carry `value.error` (a W3C error
//! code such as `no such element`) and `value.message`.
//!
//! A [`Session`] deletes itself on drop, so the browser is released on every
//! exit path.

use base64::Engine;
use reqwest::Method;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::thread;
use std::time::{Duration, Instant};

use super::{AuthError, SessionCookies};
use crate::debug;

/// Key under which W3C drivers return element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Element lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator<'a> {
    Css(&'a str),
    XPath(&'a str),
}

impl Locator<'_> {
    fn to_json(self) -> Value {
        match self {
            Self::Css(selector) => json!({ "using": "css selector", "value": selector }),
            Self::XPath(path) => json!({ "using": "xpath", "value": path }),
        }
    }
}

impl std::fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "{selector}"),
            Self::XPath(path) => write!(f, "xpath {path}"),
        }
    }
}

/// Reference to an element in the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementId(String);

#[derive(Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct WireCookie {
    name: String,
    value: String,
}

/// Connection to a WebDriver endpoint (e.g. `http://127.0.0.1:9515`).
pub struct WebDriver {
    http: Client,
    base: String,
}

impl WebDriver {
    pub fn new(base: &str, request_timeout: Duration) -> Result<Self, AuthError> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Whether the endpoint answers `/status` with `ready: true`.
    pub fn is_ready(&self) -> bool {
        self.command(Method::GET, "/status", None)
            .map(|value| value["ready"].as_bool().unwrap_or(false))
            .unwrap_or(false)
    }

    /// Open a new browser session.
    pub fn new_session(&self, capabilities: Value) -> Result<Session<'_>, AuthError> {
        let body = json!({ "capabilities": { "alwaysMatch": capabilities } });
        let value = self.command(Method::POST, "/session", Some(body))?;
        let id = value["sessionId"]
            .as_str()
            .ok_or_else(|| AuthError::driver("session not created", "response has no sessionId"))?
            .to_string();
        debug!("login"; "webdriver session {}", id);
        Ok(Session { driver: self, id })
    }

    /// Send a command and return the `value` of the response.
    fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, AuthError> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send()?;
        let status = response.status();
        let mut payload: Value = response.json()?;
        let value = payload.get_mut("value").map(Value::take).unwrap_or_default();

        if status.is_success() {
            return Ok(value);
        }

        match serde_json::from_value::<WireError>(value) {
            Ok(err) => Err(AuthError::driver(err.error, err.message)),
            Err(_) => Err(AuthError::driver(
                "unknown error",
                format!("HTTP {} from {}", status.as_u16(), path),
            )),
        }
    }
}

/// An open browser session. Deleted on drop.
pub struct Session<'a> {
    driver: &'a WebDriver,
    id: String,
}

impl Session<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, AuthError> {
        let path = format!("/session/{}{}", self.id, path);
        self.driver.command(method, &path, body)
    }

    pub fn goto(&self, url: &str) -> Result<(), AuthError> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))?;
        Ok(())
    }

    pub fn current_url(&self) -> Result<String, AuthError> {
        let value = self.command(Method::GET, "/url", None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub fn find(&self, locator: Locator<'_>) -> Result<ElementId, AuthError> {
        let value = self.command(Method::POST, "/element", Some(locator.to_json()))?;
        value[ELEMENT_KEY]
            .as_str()
            .map(|id| ElementId(id.to_string()))
            .ok_or_else(|| {
                AuthError::driver("no such element", format!("no reference for {locator}"))
            })
    }

    /// Poll for an element until it appears or `timeout` runs out.
    pub fn wait_for(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
        poll: Duration,
    ) -> Result<ElementId, AuthError> {
        wait_until(&locator.to_string(), timeout, poll, || match self.find(locator) {
            Ok(element) => Ok(Some(element)),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e),
        })
    }

    pub fn send_keys(&self, element: &ElementId, text: &str) -> Result<(), AuthError> {
        let path = format!("/element/{}/value", element.0);
        self.command(Method::POST, &path, Some(json!({ "text": text })))?;
        Ok(())
    }

    pub fn click(&self, element: &ElementId) -> Result<(), AuthError> {
        let path = format!("/element/{}/click", element.0);
        self.command(Method::POST, &path, Some(json!({})))?;
        Ok(())
    }

    pub fn cookies(&self) -> Result<SessionCookies, AuthError> {
        let value = self.command(Method::GET, "/cookie", None)?;
        let cookies: Vec<WireCookie> = serde_json::from_value(value)
            .map_err(|e| AuthError::driver("invalid cookie list", e.to_string()))?;
        Ok(cookies.into_iter().map(|c| (c.name, c.value)).collect())
    }

    /// PNG screenshot of the current page.
    pub fn screenshot(&self) -> Result<Vec<u8>, AuthError> {
        let value = self.command(Method::GET, "/screenshot", None)?;
        let encoded = value.as_str().unwrap_or_default();
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| AuthError::driver("invalid screenshot", e.to_string()))
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        let path = format!("/session/{}", self.id);
        if let Err(e) = self.driver.command(Method::DELETE, &path, None) {
            debug!("login"; "failed to close webdriver session {}: {}", self.id, e);
        }
    }
}

/// Call `check` every `poll` until it yields a value or `timeout` passes.
///
/// `check` is always called at least once.
pub fn wait_until<T>(
    what: &str,
    timeout: Duration,
    poll: Duration,
    mut check: impl FnMut() -> Result<Option<T>, AuthError>,
) -> Result<T, AuthError> {
    let started = Instant::now();
    loop {
        if let Some(found) = check()? {
            return Ok(found);
        }
        if started.elapsed() >= timeout {
            return Err(AuthError::Timeout {
                what: what.to_string(),
                after: timeout,
            });
        }
        thread::sleep(poll);
    }
}
