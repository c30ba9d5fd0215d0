//! Article API client.
//!
//! Creates a draft from a rendered article and, on request, publishes it.
//! Requests carry the login cookies plus browser-like `User-Agent`, `Referer`
//! and `Origin` headers. Only HTTP 200 counts as success; nothing is retried.

mod payload;

pub use payload::ArticleId;

use reqwest::blocking::{Client, Response};
use reqwest::header::{
    CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use std::time::Duration;

use crate::config::PlatformConfig;
use crate::error::PostError;
use crate::session::SessionCookies;
use payload::{CreateNote, CreatedResponse, PublishNote};

/// Characters of an error body kept when creating a draft fails.
const CREATE_ERROR_BODY: usize = 500;
/// Characters of an error body kept when publishing fails.
const PUBLISH_ERROR_BODY: usize = 300;

/// Article ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArticle {
    pub title: String,
    pub html_body: String,
    /// Whether a publish transition follows the draft creation.
    pub published: bool,
}

/// A created draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: ArticleId,
    pub key: String,
    edit_url: String,
    public_url: String,
}

impl Draft {
    pub fn edit_url(&self) -> &str {
        &self.edit_url
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }
}

/// Client for the create/publish endpoints.
pub struct Publisher {
    http: Client,
    platform: PlatformConfig,
}

impl Publisher {
    pub fn new(platform: &PlatformConfig) -> Result<Self, PostError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(platform.timeout))
            .build()
            .map_err(|source| PostError::Transport {
                action: "http client setup",
                source,
            })?;
        Ok(Self {
            http,
            platform: platform.clone(),
        })
    }

    /// Headers shared by every API request.
    ///
    /// A value that cannot be sent as a header fails the request up front.
    fn headers(
        &self,
        cookies: &SessionCookies,
        action: &'static str,
    ) -> Result<HeaderMap, PostError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let dynamic = [
            (USER_AGENT, self.platform.user_agent.clone()),
            (REFERER, self.platform.referer()),
            (ORIGIN, self.platform.origin().to_string()),
            (COOKIE, cookies.header_value()),
        ];
        for (name, value) in dynamic {
            let value = HeaderValue::from_str(&value).map_err(|_| PostError::InvalidHeader {
                action,
                name: name.to_string(),
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Create a draft. Fails on anything but HTTP 200 with `data.id` and `data.key`.
    pub fn create_draft(
        &self,
        article: &RenderedArticle,
        cookies: &SessionCookies,
    ) -> Result<Draft, PostError> {
        const ACTION: &str = "create draft";

        let payload = CreateNote {
            body: &article.html_body,
            name: &article.title,
            template_key: None,
        };
        let headers = self.headers(cookies, ACTION)?;
        let response = self
            .http
            .post(self.platform.notes_url())
            .headers(headers)
            .json(&payload)
            .send()
            .map_err(|source| PostError::Transport { action: ACTION, source })?;
        let response = expect_ok(response, ACTION, CREATE_ERROR_BODY)?;

        let created: CreatedResponse =
            response.json().map_err(|e| PostError::UnexpectedResponse {
                action: ACTION,
                reason: e.to_string(),
            })?;
        let note = created.data.ok_or_else(|| missing(ACTION, "data"))?;
        let id = note.id.ok_or_else(|| missing(ACTION, "data.id"))?;
        let key = note.key.ok_or_else(|| missing(ACTION, "data.key"))?;

        Ok(Draft {
            edit_url: self.platform.edit_url(&key),
            public_url: self.platform.public_url(&key),
            id,
            key,
        })
    }

    /// Move a draft to published.
    pub fn publish(&self, draft: &Draft, cookies: &SessionCookies) -> Result<(), PostError> {
        const ACTION: &str = "publish";

        let headers = self.headers(cookies, ACTION)?;
        let response = self
            .http
            .post(self.platform.publish_url(&draft.id.to_string()))
            .headers(headers)
            .json(&PublishNote::default())
            .send()
            .map_err(|source| PostError::Transport { action: ACTION, source })?;
        expect_ok(response, ACTION, PUBLISH_ERROR_BODY)?;
        Ok(())
    }
}

/// Pass a 200 response through, turn anything else into [`PostError::Http`].
fn expect_ok(
    response: Response,
    action: &'static str,
    keep: usize,
) -> Result<Response, PostError> {
    let status = response.status().as_u16();
    if status == 200 {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(PostError::Http {
        action,
        status,
        body: truncate_chars(&body, keep),
    })
}

fn missing(action: &'static str, field: &str) -> PostError {
    PostError::UnexpectedResponse {
        action,
        reason: format!("`{field}` missing"),
    }
}

/// First `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
