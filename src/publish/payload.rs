//! JSON bodies exchanged with the article API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of the create-article request.
#[derive(Debug, Serialize)]
pub struct CreateNote<'a> {
    pub body: &'a str,
    pub name: &'a str,
    pub template_key: Option<&'a str>,
}

/// Body of the publish request.
#[derive(Debug, Serialize)]
pub struct PublishNote {
    pub publish_at: Option<String>,
    pub price: u32,
}

impl Default for PublishNote {
    fn default() -> Self {
        Self {
            publish_at: None,
            price: 0,
        }
    }
}

/// Article id as returned by the API, a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// `{"data": {"id": ..., "key": ...}}`; other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreatedResponse {
    pub data: Option<CreatedNote>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedNote {
    pub id: Option<ArticleId>,
    pub key: Option<String>,
}
