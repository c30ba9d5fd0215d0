//! `[platform]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [platform]
//! base_url = "https://note.com"   # Web origin of the blogging platform
//! timeout = 30                    # Request timeout in seconds
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Browser-like user agent sent with API requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Blogging platform endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Web origin, also used for `Origin` and `Referer`.
    pub base_url: String,

    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "https://note.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: 30,
        }
    }
}

impl PlatformConfig {
    /// Origin without trailing slash.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn referer(&self) -> String {
        format!("{}/", self.origin())
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.origin())
    }

    /// Create-article endpoint.
    pub fn notes_url(&self) -> String {
        format!("{}/api/v1/text_notes", self.origin())
    }

    pub fn publish_url(&self, id: &str) -> String {
        format!("{}/{id}/publish", self.notes_url())
    }

    pub fn edit_url(&self, key: &str) -> String {
        format!("{}/n/{key}/edit", self.origin())
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/n/{key}", self.origin())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "platform.base_url must be an http(s) URL, got `{}`",
                    self.base_url
                )));
            }
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation(
                "platform.timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
