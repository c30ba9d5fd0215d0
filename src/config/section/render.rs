//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! fallback = false   # true = use the regex renderer even if CommonMark is built in
//! ```

use serde::{Deserialize, Serialize};

use crate::article::Renderer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fallback: bool,
}

impl RenderConfig {
    pub fn renderer(&self) -> Renderer {
        Renderer::select(self.fallback)
    }
}
