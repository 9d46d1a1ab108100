//! Backend API client.
//!
//! One best-effort request per page view. Every failure is reported to the
//! caller, which degrades to serving the page untouched.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};

use crate::config::ApiConfig;
use crate::observability::metrics;
use crate::posts::types::{Post, PostEnvelope, PostError};
use crate::routing::encode_slug;

const USER_AGENT: &str = concat!("seo-edge/", env!("CARGO_PKG_VERSION"));

/// Fetches post metadata by slug.
#[derive(Debug, Clone)]
pub struct PostClient {
    client: reqwest::Client,
    base: String,
}

impl PostClient {
    /// Build a client from API config.
    pub fn new(config: &ApiConfig) -> Result<Self, PostError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let base = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.posts_path.trim_matches('/')
        );

        Ok(Self { client, base })
    }

    /// URL of the post resource for `slug`.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base, encode_slug(slug))
    }

    /// Fetch the post for `slug`.
    pub async fn fetch(&self, slug: &str) -> Result<Post, PostError> {
        let url = self.post_url(slug);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: PostEnvelope = serde_json::from_slice(&body)?;
        envelope.post.ok_or(PostError::Missing)
    }

    /// Fetch the post, logging and swallowing any failure.
    pub async fn fetch_opt(&self, slug: &str, request_id: &str) -> Option<Post> {
        match self.fetch(slug).await {
            Ok(post) => {
                metrics::record_post_fetch("ok");
                Some(post)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    slug = %slug,
                    error = %e,
                    "Post fetch failed, serving page without meta"
                );
                metrics::record_post_fetch(e.outcome());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_url_encodes_slug() {
        let client = PostClient::new(&ApiConfig {
            base_url: "https://backend.example.com/".into(),
            posts_path: "/api/blogs/".into(),
            timeout_secs: 1,
        })
        .unwrap();

        assert_eq!(
            client.post_url("hello world/1"),
            "https://backend.example.com/api/blogs/hello%20world%2F1"
        );
        assert_eq!(
            client.post_url("what's (new)"),
            "https://backend.example.com/api/blogs/what's%20(new)"
        );
    }

    #[test]
    fn test_default_post_path() {
        let client = PostClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(client.post_url("a"), "http://127.0.0.1:4000/api/blogs/a");
    }
}
