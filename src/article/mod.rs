//! Article source handling.
//!
//! - [`document`] - reads the Markdown file into a title and a body
//! - [`render`] - converts the Markdown body to HTML for the article API

pub mod document;
pub mod render;

pub use document::Document;
pub use render::{Renderer, render_with};
