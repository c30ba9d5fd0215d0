//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only appears with `--verbose`
//! - status helpers (`status_success`, `status_warning`, `status_error`)
//!   for the one-line outcome of each pipeline step
//!
//! # Example
//!
//! ```ignore
//! log!("login"; "waiting for {}", "input[name=\"email\"]");
//! status_success("draft created");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let style = match module_lower {
        "login" => Style::new().bright_blue(),
        "post" | "publish" => Style::new().bright_green(),
        "error" => Style::new().bright_red(),
        "warn" | "warning" => Style::new().yellow(),
        _ => Style::new().bright_yellow(),
    }
    .bold();
    paint(&format!("[{module}]"), style)
}

/// Apply `style` when stdout supports color and `--color` allows it.
fn paint(text: &str, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

// ============================================================================
// Status lines
// ============================================================================

/// Kind of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn symbol(self) -> String {
        match self {
            Self::Success => paint("✓", Style::new().green()),
            Self::Warning => paint("⚠", Style::new().yellow()),
            Self::Error => paint("✗", Style::new().red()),
        }
    }
}

/// Format a status line: symbol, summary and an optional indented detail block.
fn format_status(kind: StatusKind, summary: &str, detail: &str) -> String {
    let mut line = format!("{} {summary}", kind.symbol());
    for detail_line in detail.lines().filter(|l| !l.trim().is_empty()) {
        line.push_str("\n    ");
        line.push_str(&paint(detail_line, Style::new().dimmed()));
    }
    line
}

fn print_status(kind: StatusKind, summary: &str, detail: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", format_status(kind, summary, detail)).ok();
    stdout.flush().ok();
}

/// Print a success line (✓ prefix, green).
pub fn status_success(summary: &str) {
    print_status(StatusKind::Success, summary, "");
}

/// Print a warning line (⚠ prefix, yellow) with detail.
pub fn status_warning(summary: &str, detail: &str) {
    print_status(StatusKind::Warning, summary, detail);
}

/// Print an error line (✗ prefix, red) with detail.
pub fn status_error(summary: &str, detail: &str) {
    print_status(StatusKind::Error, summary, detail);
}

// ============================================================================
// Tests
// ============================================================================
