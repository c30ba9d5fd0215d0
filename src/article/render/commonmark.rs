//! Markdown → HTML using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Extensions enabled for article bodies.
///
/// Fenced code blocks are part of CommonMark itself, so only tables need a flag.
fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts
}

/// Render Markdown to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
