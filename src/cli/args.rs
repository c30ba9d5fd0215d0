//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Post a Markdown article to note.com as a draft (or publish it).
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Markdown article to post; the first line is the title (default: article.md)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: notepost.toml, searched upward from cwd)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Login email
    #[arg(long, env = "LOGIN_EMAIL", hide_env_values = true)]
    pub email: Option<String>,

    /// Login password (prefer the environment variable)
    #[arg(long, env = "LOGIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Publish the article right after creating the draft
    #[arg(short, long)]
    pub publish: bool,

    /// Use the built-in regex renderer instead of CommonMark
    #[arg(long)]
    pub fallback: bool,

    /// WebDriver endpoint used for the login
    #[arg(long, value_hint = clap::ValueHint::Url)]
    pub webdriver: Option<String>,

    /// Do not start the browser driver; connect to an already running one
    #[arg(long)]
    pub no_spawn_driver: bool,

    /// Show the browser window during login
    #[arg(long)]
    pub show_browser: bool,

    /// Render the article and print the HTML without logging in
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
