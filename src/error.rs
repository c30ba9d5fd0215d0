//! Errors raised while reading and posting an article.

use std::path::PathBuf;
use thiserror::Error;

/// Article and publishing errors.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("article file not found: `{0}`")]
    FileNotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Non-200 answer from the article API. `body` is already truncated.
    #[error("{action} failed: HTTP {status}")]
    Http {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("{action} request failed")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A header value (usually a cookie) contains bytes HTTP cannot carry.
    #[error("{action} failed: invalid `{name}` header value")]
    InvalidHeader {
        action: &'static str,
        name: String,
    },

    #[error("unexpected response from {action}: {reason}")]
    UnexpectedResponse {
        action: &'static str,
        reason: String,
    },
}

impl PostError {
    /// Response body attached to an HTTP error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}
