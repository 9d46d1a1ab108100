//! Top-level error type for starting the edge.

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::origin::OriginError;
use crate::posts::PostError;

#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build post client: {0}")]
    PostClient(#[from] PostError),

    #[error("failed to build origin client: {0}")]
    Origin(#[from] OriginError),

    #[error("invalid site.cache_control header value '{0}'")]
    CacheControl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config watcher error: {0}")]
    Watch(#[from] notify::Error),
}
