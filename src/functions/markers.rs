//! Marker functions used to prove a route is wired through the edge.

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::response::Response;

use crate::functions::passthrough;
use crate::http::server::EdgeRuntime;

pub const X_EDGE_PING: HeaderName = HeaderName::from_static("x-edge-ping");
pub const X_EDGE_SEO_BLOG: HeaderName = HeaderName::from_static("x-edge-seo-blog");
pub const X_EDGE_URL: HeaderName = HeaderName::from_static("x-edge-url");

/// Pass through and tag the response with `x-edge-ping: hit`.
pub async fn ping(runtime: &EdgeRuntime, request: Request<Body>, request_id: &str) -> Response {
    let mut response = passthrough(runtime, request, request_id).await;
    response
        .headers_mut()
        .insert(X_EDGE_PING, HeaderValue::from_static("hit"));
    response
}

/// Pass through and echo the request URL in debug headers.
pub async fn debug(runtime: &EdgeRuntime, request: Request<Body>, request_id: &str) -> Response {
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::info!(
        request_id = %request_id,
        path = %request.uri().path(),
        query = %request.uri().query().unwrap_or(""),
        "seo-blog hit"
    );

    let mut response = passthrough(runtime, request, request_id).await;
    let headers = response.headers_mut();
    headers.insert(X_EDGE_SEO_BLOG, HeaderValue::from_static("hello"));
    if let Ok(value) = HeaderValue::from_str(&url) {
        headers.insert(X_EDGE_URL, value);
    }
    response
}
