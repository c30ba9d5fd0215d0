//! Browser-driven login over WebDriver.
//!
//! Flow:
//!
//! ```text
//! (spawn driver) → new session → /login → email → password → submit
//!   → wait for URL change → settle → read cookies
//! ```
//!
//! Any failure after the session is open saves a screenshot first. The
//! session is closed and the driver process stopped on every path.

use secrecy::ExposeSecret;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use super::driver::{self, DriverProcess};
use super::webdriver::{Locator, Session, WebDriver, wait_until};
use super::{AuthError, Credentials, SessionCookies, SessionProvider};
use crate::config::Config;
use crate::{debug, log};

const EMAIL_INPUT: Locator<'static> = Locator::Css("input[name=\"email\"]");
const PASSWORD_INPUT: Locator<'static> = Locator::Css("input[name=\"password\"]");
const SUBMIT_BUTTON: Locator<'static> = Locator::XPath("//button[@type='submit']");

/// Settings for one login attempt.
#[derive(Debug, Clone)]
pub struct LoginOptions {
    /// Page holding the login form.
    pub login_url: String,
    /// WebDriver endpoint.
    pub webdriver_url: String,
    /// Driver program to start, `None` to use an already running endpoint.
    pub spawn_driver: Option<String>,
    pub headless: bool,
    /// Bound for each wait (form, URL change, driver start).
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// Fixed pause after the URL changed.
    pub settle: Duration,
    /// Where the diagnostic screenshot goes on failure.
    pub screenshot: PathBuf,
}

impl LoginOptions {
    pub fn from_config(config: &Config) -> Self {
        let login = &config.login;
        Self {
            login_url: config.platform.login_url(),
            webdriver_url: login.webdriver.clone(),
            spawn_driver: login.spawn_driver.then(|| login.driver.clone()),
            headless: login.headless,
            timeout: Duration::from_secs(login.timeout),
            poll_interval: Duration::from_millis(login.poll_interval_ms),
            settle: Duration::from_millis(login.settle_ms),
            screenshot: login.screenshot.clone(),
        }
    }

    /// Capabilities for a new Chrome session.
    fn capabilities(&self) -> Value {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless");
        }
        args.extend(["--no-sandbox", "--disable-dev-shm-usage"]);
        json!({
            "browserName": "chrome",
            "goog:chromeOptions": { "args": args },
        })
    }
}

/// [`SessionProvider`] that fills in the platform's login form in a browser.
pub struct BrowserLogin {
    options: LoginOptions,
}

impl BrowserLogin {
    pub fn new(options: LoginOptions) -> Self {
        Self { options }
    }

    /// Steps performed inside an open session.
    fn submit_form(
        &self,
        session: &Session<'_>,
        credentials: &Credentials,
    ) -> Result<SessionCookies, AuthError> {
        let opts = &self.options;
        session.goto(&opts.login_url)?;

        let email = session.wait_for(EMAIL_INPUT, opts.timeout, opts.poll_interval)?;
        session.send_keys(&email, &credentials.email)?;

        let password = session.find(PASSWORD_INPUT)?;
        session.send_keys(&password, credentials.password.expose_secret())?;

        let submit = session.find(SUBMIT_BUTTON)?;
        session.click(&submit)?;

        let landed = wait_until("redirect after login", opts.timeout, opts.poll_interval, || {
            let url = session.current_url()?;
            Ok((url != opts.login_url).then_some(url))
        })?;
        debug!("login"; "redirected to {}", landed);

        thread::sleep(opts.settle);
        session.cookies()
    }

    /// Save a screenshot of the current page, logging where it went.
    fn capture(&self, session: &Session<'_>) {
        let path = &self.options.screenshot;
        let saved = session
            .screenshot()
            .map_err(|e| e.to_string())
            .and_then(|png| std::fs::write(path, png).map_err(|e| e.to_string()));
        match saved {
            Ok(()) => log!("login"; "screenshot saved to {}", path.display()),
            Err(e) => debug!("login"; "could not save screenshot: {}", e),
        }
    }
}

impl SessionProvider for BrowserLogin {
    fn login(&self, credentials: &Credentials) -> Result<SessionCookies, AuthError> {
        let opts = &self.options;

        let mut process = match &opts.spawn_driver {
            Some(program) => Some(DriverProcess::spawn(
                program,
                driver::port_of(&opts.webdriver_url),
            )?),
            None => None,
        };

        let webdriver = WebDriver::new(&opts.webdriver_url, opts.timeout)?;
        if let Some(process) = process.as_mut() {
            process.wait_ready(&webdriver, opts.timeout, opts.poll_interval)?;
        }

        let session = webdriver.new_session(opts.capabilities())?;
        match self.submit_form(&session, credentials) {
            Ok(cookies) => {
                log!("login"; "logged in ({} cookies)", cookies.len());
                Ok(cookies)
            }
            Err(e) => {
                log!("error"; "login failed: {}", e);
                self.capture(&session);
                Err(e)
            }
        }
    }
}
