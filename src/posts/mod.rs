//! Post metadata subsystem.
//!
//! # Data Flow
//! ```text
//! slug
//!     → client.rs (GET {base_url}{posts_path}/{slug}, single attempt)
//!     → types.rs ({"post": {...}} envelope)
//!     → Post or None
//! ```

pub mod client;
pub mod types;

pub use client::PostClient;
pub use types::{Post, PostEnvelope, PostError};
