//! Markdown → HTML conversion.
//!
//! Two renderers are available:
//!
//! - [`Renderer::Commonmark`] - `pulldown-cmark` with tables and fenced code
//!   blocks. Only present when the `commonmark` feature is enabled (default).
//! - [`Renderer::Fallback`] - an ordered list of regex substitutions, see
//!   [`fallback`]. Always available.
//!
//! Both are pure: same input, same output, never an error.

#[cfg(feature = "commonmark")]
mod commonmark;
pub mod fallback;

/// Which converter turns the article body into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Full CommonMark renderer.
    #[cfg(feature = "commonmark")]
    Commonmark,
    /// Regex pipeline used when no Markdown library is compiled in.
    Fallback,
}

impl Default for Renderer {
    #[cfg(feature = "commonmark")]
    fn default() -> Self {
        Self::Commonmark
    }

    #[cfg(not(feature = "commonmark"))]
    fn default() -> Self {
        Self::Fallback
    }
}

impl Renderer {
    /// Pick the renderer, honoring an explicit request for the fallback.
    pub fn select(force_fallback: bool) -> Self {
        if force_fallback {
            Self::Fallback
        } else {
            Self::default()
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "commonmark")]
            Self::Commonmark => "commonmark",
            Self::Fallback => "fallback",
        }
    }
}

/// Render Markdown with the default renderer.
pub fn render(markdown: &str) -> String {
    render_with(markdown, Renderer::default())
}

/// Render Markdown with the given renderer.
pub fn render_with(markdown: &str, renderer: Renderer) -> String {
    match renderer {
        #[cfg(feature = "commonmark")]
        Renderer::Commonmark => commonmark::render(markdown),
        Renderer::Fallback => fallback::render(markdown),
    }
}
