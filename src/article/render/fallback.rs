//! Regex-based Markdown → HTML fallback.
//!
//! The conversion is a fixed sequence of global substitutions over the whole
//! input, followed by paragraph wrapping:
//!
//! ```text
//! code blocks → h3 → h2 → h1 → bold → italic → links
//!   → list items → hr → paragraphs
//! ```
//!
//! The order matters and is part of the output contract:
//!
//! - `###` runs before `##` before `#` so shorter markers never eat longer ones
//! - bold runs before italic so `**x**` is not read as two italics
//! - code blocks are converted first but their contents are *not* protected;
//!   later rules still rewrite `**`, `*`, links etc. inside `<pre><code>`
//! - list items are wrapped one by one, never grouped into `<ul>`
//!
//! Text is inserted verbatim, nothing is HTML-escaped.

use regex::Regex;
use std::sync::LazyLock;

/// One substitution step: pattern and replacement template.
struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// Substitution rules in application order.
static RULES: LazyLock<[Rule; 9]> = LazyLock::new(|| {
    [
        Rule::new(
            "code_block",
            r"(?s)```\w*\n(.*?)```",
            "<pre><code>${1}</code></pre>",
        ),
        Rule::new("h3", r"(?m)^### (.+)$", "<h3>${1}</h3>"),
        Rule::new("h2", r"(?m)^## (.+)$", "<h2>${1}</h2>"),
        Rule::new("h1", r"(?m)^# (.+)$", "<h1>${1}</h1>"),
        Rule::new("bold", r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        Rule::new("italic", r"\*(.+?)\*", "<em>${1}</em>"),
        Rule::new("link", r"\[(.+?)\]\((.+?)\)", r#"<a href="${2}">${1}</a>"#),
        Rule::new("list_item", r"(?m)^- (.+)$", "<li>${1}</li>"),
        Rule::new("rule", r"(?m)^---$", "<hr>"),
    ]
});

/// Blocks starting with one of these tags are left unwrapped.
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(h[1-6]|ul|ol|li|pre|hr)").unwrap());

/// Render Markdown with the fallback rules.
pub fn render(markdown: &str) -> String {
    let html = RULES
        .iter()
        .fold(markdown.to_string(), |text, rule| rule.apply(&text));
    wrap_paragraphs(&html)
}

/// Wrap every non-block chunk between blank lines in `<p>`.
///
/// Block chunks are kept exactly as they are (surrounding whitespace included);
/// paragraph text is trimmed; chunks that are empty after trimming are dropped.
fn wrap_paragraphs(html: &str) -> String {
    html.split("\n\n")
        .filter_map(|block| {
            let trimmed = block.trim();
            if trimmed.is_empty() {
                None
            } else if BLOCK_START.is_match(trimmed) {
                Some(block.to_string())
            } else {
                Some(format!("<p>{trimmed}</p>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Names of the substitution steps, in order.
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|rule| rule.name).collect()
}
