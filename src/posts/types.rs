//! Post payload types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Post metadata served by the backend API. Every field may be missing.
///
/// Numbers and booleans are kept as their JSON text; arrays and objects in
/// these fields are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub content_html: Option<String>,
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl Post {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn excerpt(&self) -> Option<&str> {
        non_empty(&self.excerpt)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    pub fn slug(&self) -> Option<&str> {
        non_empty(&self.slug)
    }

    pub fn published_at(&self) -> Option<&str> {
        non_empty(&self.published_at)
    }

    pub fn content_html(&self) -> Option<&str> {
        non_empty(&self.content_html)
    }
}

// Empty strings are treated the same as absent fields.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Envelope returned by `GET /api/blogs/{slug}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostEnvelope {
    #[serde(default)]
    pub post: Option<Post>,
}

/// Errors that can occur while fetching a post.
#[derive(Debug, Error)]
pub enum PostError {
    /// Connection, timeout or other transport failure.
    #[error("post request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("post API returned status {0}")]
    Status(u16),

    /// Body was not the expected JSON.
    #[error("malformed post JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend answered without a post.
    #[error("post API returned no post")]
    Missing,
}

impl PostError {
    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            PostError::Transport(e) if e.is_timeout() => "timeout",
            PostError::Transport(_) => "transport",
            PostError::Status(_) => "status",
            PostError::Decode(_) => "decode",
            PostError::Missing => "missing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_post() {
        let envelope: PostEnvelope = serde_json::from_str(
            r#"{"post":{"title":"Hello","excerpt":"Short","imageUrl":"https://img/x.jpg",
                "slug":"hello","publishedAt":"2024-05-01T10:00:00Z","contentHtml":"<p>Hi</p>",
                "tags":["ignored"]}}"#,
        )
        .unwrap();
        let post = envelope.post.unwrap();
        assert_eq!(post.title(), Some("Hello"));
        assert_eq!(post.image_url(), Some("https://img/x.jpg"));
        assert_eq!(post.published_at(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(post.content_html(), Some("<p>Hi</p>"));
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let envelope: PostEnvelope =
            serde_json::from_str(r#"{"post":{"title":"","slug":null}}"#).unwrap();
        let post = envelope.post.unwrap();
        assert_eq!(post.title(), None);
        assert_eq!(post.slug(), None);
        assert_eq!(post.excerpt(), None);
    }

    #[test]
    fn test_null_post() {
        let envelope: PostEnvelope = serde_json::from_str(r#"{"post":null}"#).unwrap();
        assert!(envelope.post.is_none());
        let envelope: PostEnvelope = serde_json::from_str(r#"{"error":"not found"}"#).unwrap();
        assert!(envelope.post.is_none());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(PostError::Status(404).to_string(), "post API returned status 404");
        assert_eq!(PostError::Missing.outcome(), "missing");
    }

    #[test]
    fn test_non_string_fields_keep_the_post() {
        let envelope: PostEnvelope = serde_json::from_str(
            r#"{"post":{"title":"T","publishedAt":1714554000,"slug":true,"imageUrl":["a"]}}"#,
        )
        .unwrap();
        let post = envelope.post.unwrap();
        assert_eq!(post.title(), Some("T"));
        assert_eq!(post.published_at(), Some("1714554000"));
        assert_eq!(post.slug(), Some("true"));
        assert_eq!(post.image_url(), None);
    }
}
