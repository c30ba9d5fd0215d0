//! `[login]` section configuration.
//!
//! Controls the browser used to log in. Credentials never come from this file;
//! they are read from `LOGIN_EMAIL` / `LOGIN_PASSWORD`.
//!
//! # Example
//!
//! ```toml
//! [login]
//! webdriver = "http://127.0.0.1:9515"  # WebDriver endpoint
//! driver = "chromedriver"              # Driver program started on that port
//! spawn_driver = true                  # false = endpoint is already running
//! headless = true
//! timeout = 15                         # Seconds per wait
//! poll_interval_ms = 250
//! settle_ms = 2000                     # Pause after the login redirect
//! screenshot = "login_error.png"       # Saved when login fails
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigError;

/// Browser login settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub webdriver: String,
    pub driver: String,
    pub spawn_driver: bool,
    pub headless: bool,
    /// Seconds to wait for the form, the redirect and the driver.
    pub timeout: u64,
    pub poll_interval_ms: u64,
    pub settle_ms: u64,
    pub screenshot: PathBuf,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            webdriver: "http://127.0.0.1:9515".to_string(),
            driver: "chromedriver".to_string(),
            spawn_driver: true,
            headless: true,
            timeout: 15,
            poll_interval_ms: 250,
            settle_ms: 2000,
            screenshot: PathBuf::from("login_error.png"),
        }
    }
}

impl LoginConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.webdriver).is_err() {
            return Err(ConfigError::Validation(format!(
                "login.webdriver is not a valid URL: `{}`",
                self.webdriver
            )));
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation(
                "login.timeout must be greater than 0".to_string(),
            ));
        }
        if self.spawn_driver && self.driver.trim().is_empty() {
            return Err(ConfigError::Validation(
                "login.driver must name a program when spawn_driver is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
