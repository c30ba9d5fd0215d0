//! notepost - post a Markdown article to note.com.

#![allow(dead_code)]

mod article;
mod cli;
mod config;
mod error;
mod logger;
mod pipeline;
mod publish;
mod session;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::{Config, ConfigError};
use pipeline::{PostOutcome, PublishStatus};
use session::{BrowserLogin, LoginOptions, SessionProvider};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load(cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "using {}", path.display());
    }

    let provider = BrowserLogin::new(LoginOptions::from_config(&config));
    post(&config, &provider)
}

/// Everything after config loading. An `Err` here means exit code 1.
fn post(config: &Config, provider: &dyn SessionProvider) -> Result<()> {
    if config.dry_run {
        let article = pipeline::prepare(config)?;
        println!("{}", article.html_body);
        return Ok(());
    }

    config.validate()?;
    let outcome = pipeline::run(config, provider)?;
    report_outcome(&outcome);
    Ok(())
}

fn report_outcome(outcome: &PostOutcome) {
    let draft = &outcome.draft;
    logger::status_success("draft created");
    println!("    id:  {}", draft.id);
    println!("    key: {}", draft.key);
    println!("    edit: {}", draft.edit_url());

    match &outcome.publish {
        Some(PublishStatus::Published) => {
            logger::status_success(&format!("published: {}", draft.public_url()));
        }
        Some(PublishStatus::Failed(e)) => {
            logger::status_warning(
                &format!("{e}; the draft is still available"),
                e.body().unwrap_or_default(),
            );
        }
        None => log!("post"; "run with --publish to publish right away"),
    }
}

fn report_error(e: &anyhow::Error) {
    let detail = e
        .downcast_ref::<error::PostError>()
        .and_then(error::PostError::body)
        .unwrap_or_default();
    logger::status_error(&format!("{e:#}"), detail);

    if let Some(hint) = e.downcast_ref::<ConfigError>().and_then(ConfigError::hint) {
        eprintln!("{hint}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use session::{AuthError, Credentials, SessionCookies};
    use std::fs;
    use tempfile::TempDir;
    use testing::FakeServer;

    struct StaticLogin;

    impl SessionProvider for StaticLogin {
        fn login(&self, _: &Credentials) -> Result<SessionCookies, AuthError> {
            Ok([("_session", "abc")].into_iter().collect())
        }
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["notepost"];
        argv.extend_from_slice(args);
        let mut cli = Cli::try_parse_from(argv).unwrap();
        if !args.contains(&"--email") {
            cli.email = None;
        }
        if !args.contains(&"--password") {
            cli.password = None;
        }
        cli
    }

    /// Config file plus article inside a temp dir.
    fn site(dir: &TempDir, base_url: &str) -> String {
        fs::write(dir.path().join("article.md"), "# Title\n\nBody").unwrap();
        let config = dir.path().join(config::CONFIG_FILE);
        let toml = format!("[platform]\nbase_url = \"{base_url}\"\ntimeout = 5\n");
        fs::write(&config, toml).unwrap();
        config.to_string_lossy().into_owned()
    }

    #[test]
    fn test_placeholder_credentials_fail() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "https://note.test");

        let err = execute(&cli(&["--config", config.as_str()])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Credentials)
        ));
    }

    #[test]
    fn test_missing_article_fails() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir, "https://note.test");
        let args = cli(&[
            "--config",
            config.as_str(),
            "--email",
            "me@example.com",
            "--password",
            "pw",
        ]);
        let mut config = Config::load(&args).unwrap();
        config.post.file = dir.path().join("missing.md");

        let err = post(&config, &StaticLogin).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<error::PostError>(),
            Some(error::PostError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_failed_publish_still_succeeds() {
        let server = FakeServer::start(|req| {
            if req.url.ends_with("/publish") {
                (500, Value::String("boom".to_string()))
            } else {
                (200, json!({ "data": { "id": 3, "key": "n3" } }))
            }
        });
        let dir = TempDir::new().unwrap();
        let config = site(&dir, &server.url());
        let args = cli(&[
            "--config",
            config.as_str(),
            "--publish",
            "--email",
            "me@example.com",
            "--password",
            "pw",
        ]);
        let config = Config::load(&args).unwrap();

        assert!(post(&config, &StaticLogin).is_ok());
        assert_eq!(server.requests().len(), 2);
    }

    #[test]
    fn test_failed_draft_fails() {
        let server = FakeServer::start(|_| (401, Value::String("login required".to_string())));
        let dir = TempDir::new().unwrap();
        let config = site(&dir, &server.url());
        let args = cli(&[
            "--config",
            config.as_str(),
            "--email",
            "me@example.com",
            "--password",
            "pw",
        ]);
        let config = Config::load(&args).unwrap();

        let err = post(&config, &StaticLogin).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<error::PostError>(),
            Some(error::PostError::Http { status: 401, .. })
        ));
    }
}
