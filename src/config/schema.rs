//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static site the edge sits in front of.
    pub origin: OriginConfig,

    /// Backend API serving post metadata.
    pub api: ApiConfig,

    /// Site identity used when building meta tags.
    pub site: SiteConfig,

    /// Edge functions bound to path prefixes.
    pub functions: Vec<FunctionConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request/response limits.
    pub security: SecurityConfig,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            origin: OriginConfig::default(),
            api: ApiConfig::default(),
            site: SiteConfig::default(),
            functions: default_functions(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Origin server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Origin address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Post metadata API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend (scheme + host, no trailing path).
    pub base_url: String,

    /// Path under which posts are served; the slug is appended.
    pub posts_path: String,

    /// Timeout for the single post fetch, in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4000".to_string(),
            posts_path: "/api/blogs".to_string(),
            timeout_secs: 3,
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin used for canonical and fallback image URLs.
    pub origin: String,

    /// Site name for `og:site_name` and the title suffix.
    pub name: String,

    /// Inserted between the post title and the site name in `<title>`.
    pub title_separator: String,

    /// Description used when a post has no excerpt.
    pub default_description: String,

    /// Path of the fallback share image, relative to `origin`.
    pub placeholder_image: String,

    /// Path of the detail page used for canonical URLs.
    pub canonical_path: String,

    /// `cache-control` value set on rewritten pages.
    pub cache_control: String,

    /// `lang` attribute of generated pages.
    pub lang: String,

    /// Stylesheets linked from generated pages.
    pub stylesheets: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            name: "Blog".to_string(),
            title_separator: " — ".to_string(),
            default_description: "Read this post.".to_string(),
            placeholder_image: "/assets/images/resources/placeholder.jpg".to_string(),
            canonical_path: "/html/blog-detail.html".to_string(),
            cache_control: "public, max-age=60, s-maxage=300".to_string(),
            lang: "en".to_string(),
            stylesheets: Vec::new(),
        }
    }
}

/// Kind of edge function bound to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    /// Fetch post metadata and rewrite the page head.
    SeoBlog,
    /// Mark responses with `x-edge-ping: hit`.
    Ping,
    /// Echo the request URL in debug headers.
    Debug,
}

impl FunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::SeoBlog => "seo-blog",
            FunctionKind::Ping => "ping",
            FunctionKind::Debug => "debug",
        }
    }
}

/// How meta tags are written into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InjectionMode {
    /// Append tags at the end of `<head>`.
    #[default]
    Append,
    /// Strip existing SEO tags from `<head>`, then append.
    Replace,
    /// Render a whole page from the post, ignoring the origin.
    Generate,
}

impl InjectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectionMode::Append => "append",
            InjectionMode::Replace => "replace",
            InjectionMode::Generate => "generate",
        }
    }
}

/// Edge function binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FunctionConfig {
    /// Function identifier for logging/metrics.
    pub name: String,

    /// What the function does.
    pub kind: FunctionKind,

    /// Path prefix to match.
    pub path_prefix: String,

    /// Binding priority (higher = checked first).
    #[serde(default)]
    pub priority: u32,

    /// Origin path to fetch instead of the request path (query is kept).
    #[serde(default)]
    pub rewrite_to: Option<String>,

    /// Path prefix whose remainder is the slug (`seo-blog` only).
    #[serde(default = "default_slug_prefix")]
    pub slug_prefix: String,

    /// Injection mode (`seo-blog` only).
    #[serde(default)]
    pub mode: InjectionMode,
}

fn default_slug_prefix() -> String {
    "/blog/".to_string()
}

fn default_functions() -> Vec<FunctionConfig> {
    vec![
        FunctionConfig {
            name: "seo-blog".to_string(),
            kind: FunctionKind::SeoBlog,
            path_prefix: "/blog/".to_string(),
            priority: 10,
            rewrite_to: Some("/html/blog-detail.html".to_string()),
            slug_prefix: default_slug_prefix(),
            mode: InjectionMode::Append,
        },
        FunctionConfig {
            name: "seo-blog-detail".to_string(),
            kind: FunctionKind::SeoBlog,
            path_prefix: "/html/blog-detail.html".to_string(),
            priority: 10,
            rewrite_to: None,
            slug_prefix: default_slug_prefix(),
            mode: InjectionMode::Append,
        },
    ]
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Origin request timeout in seconds.
    pub origin_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            origin_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request/response limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum origin page size buffered for rewriting, in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}
