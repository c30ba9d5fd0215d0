//! Login session acquisition.
//!
//! The article API authenticates with the cookies of a logged-in browser
//! session. [`SessionProvider`] is the seam: the pipeline asks a provider for
//! [`SessionCookies`] and never touches the browser itself.
//!
//! - [`browser`] - [`BrowserLogin`], fills in the login form over WebDriver
//! - [`webdriver`] - minimal W3C WebDriver client (blocking HTTP)
//! - [`driver`] - optional local `chromedriver` process

pub mod browser;
pub mod driver;
pub mod webdriver;

use secrecy::SecretString;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

pub use browser::{BrowserLogin, LoginOptions};

/// Email shipped in sample configs; treated as "not configured".
pub const PLACEHOLDER_EMAIL: &str = "your_email@example.com";
/// Password shipped in sample configs; treated as "not configured".
pub const PLACEHOLDER_PASSWORD: &str = "your_password";

/// Login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(PLACEHOLDER_EMAIL, PLACEHOLDER_PASSWORD)
    }
}

/// Cookies issued by the platform after a successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies(BTreeMap<String, String>);

impl SessionCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for a `Cookie` request header: `a=1; b=2`.
    pub fn header_value(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionCookies {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Login failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    /// Error reported by the WebDriver endpoint (W3C error code + message).
    #[error("webdriver error `{code}`: {message}")]
    Driver { code: String, message: String },

    #[error("webdriver request failed")]
    Transport(#[from] reqwest::Error),

    #[error("could not start browser driver: {0}")]
    Launch(String),
}

impl AuthError {
    pub fn driver(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Driver {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether this is the W3C `no such element` error.
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Self::Driver { code, .. } if code == "no such element")
    }
}

/// Something that can log in and hand back session cookies.
pub trait SessionProvider {
    fn login(&self, credentials: &Credentials) -> Result<SessionCookies, AuthError>;
}
