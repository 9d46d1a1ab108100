//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → functions/ (bound edge function or pass-through)
//!     → origin.rs (forward to the static site)
//!     → response.rs (header fix-ups)
//!     → Send to client
//! ```

pub mod origin;
pub mod request;
pub mod response;
pub mod server;

pub use origin::{OriginClient, OriginError};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{EdgeRuntime, HttpServer};
