//! Edge functions.
//!
//! # Data Flow
//! ```text
//! request
//!     → FunctionRouter match
//!     → seo_blog.rs  (slug → post → origin page → rewritten head)
//!     → markers.rs   (ping / debug headers on a pass-through)
//!     → passthrough  (no binding)
//! ```

pub mod markers;
pub mod seo_blog;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::http::origin::origin_target;
use crate::http::server::EdgeRuntime;

/// Forward the request to the origin unchanged.
pub async fn passthrough(
    runtime: &EdgeRuntime,
    request: Request<Body>,
    request_id: &str,
) -> Response {
    let target = origin_target(request.uri(), None);
    match runtime.origin.forward(request, &target, request_id, false).await {
        Ok(response) => response.map(Body::new),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Origin request failed");
            (e.status(), "Origin request failed").into_response()
        }
    }
}
