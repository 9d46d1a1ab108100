//! Response header handling.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Decide whether an origin response can be rewritten
//! - Fix up headers after the body has been replaced

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};

const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
];

/// Remove headers that only apply to a single connection.
///
/// `transfer-encoding` is left to hyper, which recomputes framing.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
}

/// True for 2xx, uncompressed `text/html` responses.
pub fn is_rewritable_html(status: StatusCode, headers: &HeaderMap) -> bool {
    if !status.is_success() {
        return false;
    }

    let is_html = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false);

    let encoded = headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|v| !v.trim().eq_ignore_ascii_case("identity"))
        .unwrap_or(false);

    is_html && !encoded
}

/// Adjust origin headers for a rewritten body.
///
/// Length and validators no longer describe the new body; caching follows
/// the edge's own policy.
pub fn rewrite_headers(headers: &mut HeaderMap, cache_control: Option<&HeaderValue>) {
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONTENT_ENCODING);
    headers.remove(header::ETAG);
    headers.remove(header::LAST_MODIFIED);
    if let Some(value) = cache_control {
        headers.insert(header::CACHE_CONTROL, value.clone());
    }
}
