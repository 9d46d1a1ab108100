//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (function lookup)
//!     → matcher.rs (evaluate path prefix)
//!     → slug.rs (resolve post slug for seo functions)
//!     → Return: bound function or pass-through
//!
//! Compilation (at startup and on reload):
//!     FunctionConfig[]
//!     → Sort by priority
//!     → Freeze as immutable FunctionRouter
//! ```

pub mod matcher;
pub mod router;
pub mod slug;

pub use router::{BoundFunction, FunctionRouter};
pub use slug::{encode_slug, extract_slug};
