//! Edge middleware that injects post metadata into a static blog page.

pub mod config;
pub mod error;
pub mod functions;
pub mod http;
pub mod lifecycle;
pub mod meta;
pub mod observability;
pub mod posts;
pub mod routing;

pub use config::schema::EdgeConfig;
pub use error::EdgeError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
