//! `[post]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [post]
//! file = "article.md"   # Markdown source, first line is the title
//! publish = false       # true = publish right after creating the draft
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    pub file: PathBuf,
    pub publish: bool,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("article.md"),
            publish: false,
        }
    }
}
