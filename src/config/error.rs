//! Configuration error types.

use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),

    #[error("login email and password are not set")]
    Credentials,
}

impl ConfigError {
    /// Fix hint shown under the error, if there is one.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Credentials => Some(format!(
                "{} LOGIN_EMAIL=you@example.com LOGIN_PASSWORD=... notepost",
                "hint:".if_supports_color(Stream::Stderr, |t| t.yellow())
            )),
            Self::Io(path, _) => Some(format!(
                "{} check the `--config` path: {}",
                "hint:".if_supports_color(Stream::Stderr, |t| t.yellow()),
                path.display()
            )),
            _ => None,
        }
    }
}
