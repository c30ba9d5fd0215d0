//! One posting run.
//!
//! ```text
//! read article → render → login → create draft → (publish)
//! ```
//!
//! The article is read and rendered before login so a missing file fails fast.
//! A failed publish leaves the draft in place and is reported as a warning.

use anyhow::{Context, Result};

use crate::article::render::fallback;
use crate::article::{Document, Renderer, render_with};
use crate::config::Config;
use crate::error::PostError;
use crate::{debug, log};
use crate::publish::{Draft, Publisher, RenderedArticle};
use crate::session::SessionProvider;

/// Result of a completed run.
#[derive(Debug)]
pub struct PostOutcome {
    pub draft: Draft,
    /// `None` when publishing was not requested.
    pub publish: Option<PublishStatus>,
}

#[derive(Debug)]
pub enum PublishStatus {
    Published,
    /// The publish call failed; the draft still exists.
    Failed(PostError),
}

/// Read the configured article and turn it into a submission.
pub fn prepare(config: &Config) -> Result<RenderedArticle> {
    let path = &config.post.file;
    let document = Document::read(path)?;
    log!("post"; "title: {}", document.title);
    log!("post"; "body: {} chars", document.char_count());

    let renderer = config.renderer();
    debug!("post"; "rendering with {}", renderer.name());
    if renderer == Renderer::Fallback {
        debug!("post"; "rules: {}", fallback::rule_names().join(" → "));
    }

    Ok(RenderedArticle {
        html_body: render_with(&document.body, renderer),
        title: document.title,
        published: config.post.publish,
    })
}

/// Run the full pipeline against `provider` for the session cookies.
pub fn run(config: &Config, provider: &dyn SessionProvider) -> Result<PostOutcome> {
    let article = prepare(config)?;

    log!("login"; "logging in as {}", config.credentials.email);
    let cookies = provider
        .login(&config.credentials)
        .context("login failed")?;

    let publisher = Publisher::new(&config.platform)?;
    log!("post"; "creating draft");
    let draft = publisher.create_draft(&article, &cookies)?;
    log!("post"; "draft created: id {} key {}", draft.id, draft.key);

    let publish = article.published.then(|| {
        log!("publish"; "publishing {}", draft.key);
        match publisher.publish(&draft, &cookies) {
            Ok(()) => PublishStatus::Published,
            Err(e) => PublishStatus::Failed(e),
        }
    });

    Ok(PostOutcome { draft, publish })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AuthError, Credentials, SessionCookies};
    use crate::testing::FakeServer;
    use serde_json::{Value, json};
    use std::cell::Cell;
    use std::time::Duration;
    use tempfile::TempDir;

    struct FakeLogin {
        fail: bool,
        calls: Cell<usize>,
    }

    impl FakeLogin {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Cell::new(0),
            }
        }
    }

    impl SessionProvider for FakeLogin {
        fn login(&self, _: &Credentials) -> Result<SessionCookies, AuthError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(AuthError::Timeout {
                    what: "input[name=\"email\"]".to_string(),
                    after: Duration::from_secs(15),
                });
            }
            Ok([("_session", "abc")].into_iter().collect())
        }
    }

    fn config(dir: &TempDir, server: Option<&FakeServer>, content: &str) -> Config {
        let file = dir.path().join("article.md");
        std::fs::write(&file, content).unwrap();

        let mut config = Config::default();
        config.post.file = file;
        config.credentials = Credentials::new("me@example.com", "pw");
        if let Some(server) = server {
            config.platform.base_url = server.url();
            config.platform.timeout = 5;
        }
        config
    }

    fn api(publish_status: u16) -> FakeServer {
        FakeServer::start(move |req| {
            if req.url.ends_with("/publish") {
                (publish_status, Value::String("denied".to_string()))
            } else {
                (200, json!({ "data": { "id": 9, "key": "n9" } }))
            }
        })
    }

    #[test]
    fn test_prepare_uses_configured_renderer() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, None, "# Hello\n\n**hi** there");
        config.render.fallback = true;

        let article = prepare(&config).unwrap();
        assert_eq!(article.title, "Hello");
        assert_eq!(article.html_body, "<p><strong>hi</strong> there</p>");
        assert!(!article.published);
    }

    #[test]
    fn test_missing_file_fails_before_login() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, None, "");
        config.post.file = dir.path().join("missing.md");
        let login = FakeLogin::new(false);

        let err = run(&config, &login).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PostError>(),
            Some(PostError::FileNotFound(_))
        ));
        assert_eq!(login.calls.get(), 0);
    }

    #[test]
    fn test_run_creates_draft() {
        let dir = TempDir::new().unwrap();
        let server = api(200);
        let config = config(&dir, Some(&server), "# Title\n\nBody");

        let outcome = run(&config, &FakeLogin::new(false)).unwrap();
        assert_eq!(outcome.draft.key, "n9");
        assert!(outcome.publish.is_none());

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("Cookie"), Some("_session=abc"));
        let body: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["name"], "Title");
    }

    #[test]
    fn test_run_publishes_when_requested() {
        let dir = TempDir::new().unwrap();
        let server = api(200);
        let mut config = config(&dir, Some(&server), "# Title\n\nBody");
        config.post.publish = true;

        let outcome = run(&config, &FakeLogin::new(false)).unwrap();
        assert!(matches!(outcome.publish, Some(PublishStatus::Published)));
        assert_eq!(server.requests()[1].url, "/api/v1/text_notes/9/publish");
    }

    #[test]
    fn test_publish_failure_keeps_draft() {
        let dir = TempDir::new().unwrap();
        let server = api(500);
        let mut config = config(&dir, Some(&server), "# Title\n\nBody");
        config.post.publish = true;

        let outcome = run(&config, &FakeLogin::new(false)).unwrap();
        assert_eq!(outcome.draft.key, "n9");
        match outcome.publish {
            Some(PublishStatus::Failed(PostError::Http { status, body, .. })) => {
                assert_eq!(status, 500);
                assert_eq!(body, "denied");
            }
            other => panic!("unexpected publish status: {other:?}"),
        }
    }

    #[test]
    fn test_login_failure_stops_run() {
        let dir = TempDir::new().unwrap();
        let server = api(200);
        let config = config(&dir, Some(&server), "# Title\n\nBody");

        let err = run(&config, &FakeLogin::new(true)).unwrap_err();
        assert!(err.downcast_ref::<AuthError>().is_some());
        assert!(server.requests().is_empty());
    }
}
