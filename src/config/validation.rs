//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Detect conflicting function bindings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::uri::Authority;
use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener.bind_address '{0}'")]
    BindAddress(String),

    #[error("invalid observability.metrics_address '{0}'")]
    MetricsAddress(String),

    #[error("invalid origin.address '{0}'")]
    OriginAddress(String),

    #[error("{field} must be an http(s) URL, got '{value}'")]
    Url { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("function '{name}': {field} must start with '/'")]
    RelativePath { name: String, field: &'static str },

    #[error("{field} is not a valid header value: '{value}'")]
    HeaderValue { field: &'static str, value: String },

    #[error("duplicate function name '{0}'")]
    DuplicateFunction(String),

    #[error("api.posts_path must name a resource under /, got '{0}'")]
    PostsPath(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.origin.address.parse::<Authority>().is_err() {
        errors.push(ValidationError::OriginAddress(config.origin.address.clone()));
    }

    check_http_url(&mut errors, "api.base_url", &config.api.base_url);
    check_http_url(&mut errors, "site.origin", &config.site.origin);

    let posts_path = &config.api.posts_path;
    if !posts_path.starts_with('/') || posts_path.trim_matches('/').is_empty() {
        errors.push(ValidationError::PostsPath(posts_path.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if HeaderValue::from_str(&config.site.cache_control).is_err() {
        errors.push(ValidationError::HeaderValue {
            field: "site.cache_control",
            value: config.site.cache_control.clone(),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::Zero("api.timeout_secs"));
    }
    if config.timeouts.origin_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.origin_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let mut names = HashSet::new();
    for function in &config.functions {
        if !names.insert(function.name.as_str()) {
            errors.push(ValidationError::DuplicateFunction(function.name.clone()));
        }
        if !function.path_prefix.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                name: function.name.clone(),
                field: "path_prefix",
            });
        }
        if !function.slug_prefix.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                name: function.name.clone(),
                field: "slug_prefix",
            });
        }
        if let Some(rewrite) = &function.rewrite_to {
            if !rewrite.starts_with('/') {
                errors.push(ValidationError::RelativePath {
                    name: function.name.clone(),
                    field: "rewrite_to",
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let ok = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !ok {
        errors.push(ValidationError::Url {
            field,
            value: value.to_string(),
        });
    }
}
