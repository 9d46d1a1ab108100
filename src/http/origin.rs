//! Origin pass-through client.
//!
//! Forwards a request to the static site and hands back the raw response.
//! The request path may be rewritten (pretty blog URLs are served by a
//! single detail page on the origin).

use std::str::FromStr;
use std::time::Duration;

use axum::body::Body;
use axum::http::uri::Authority;
use axum::http::{header, HeaderValue, Request, Response, StatusCode, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::config::{OriginConfig, TimeoutConfig};
use crate::http::request::X_REQUEST_ID;
use crate::http::response::strip_hop_by_hop;

/// Errors talking to the origin.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin address '{0}'")]
    Address(String),

    #[error("invalid origin URI: {0}")]
    Uri(#[from] axum::http::Error),

    #[error("origin request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("origin timed out after {0:?}")]
    Timeout(Duration),
}

impl OriginError {
    /// Status returned to the client for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            OriginError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// HTTP client bound to one origin.
#[derive(Debug, Clone)]
pub struct OriginClient {
    client: Client<HttpConnector, Body>,
    authority: Authority,
    timeout: Duration,
}

impl OriginClient {
    pub fn new(origin: &OriginConfig, timeouts: &TimeoutConfig) -> Result<Self, OriginError> {
        let authority = Authority::from_str(&origin.address)
            .map_err(|_| OriginError::Address(origin.address.clone()))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            authority,
            timeout: Duration::from_secs(timeouts.origin_secs),
        })
    }

    /// Forward `request` to `path_and_query` on the origin.
    ///
    /// With `identity` set the origin is asked for an uncompressed body so
    /// the edge can rewrite it.
    pub async fn forward(
        &self,
        request: Request<Body>,
        path_and_query: &str,
        request_id: &str,
        identity: bool,
    ) -> Result<Response<Incoming>, OriginError> {
        let (parts, body) = request.into_parts();

        let uri = Uri::builder()
            .scheme("http")
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?;

        let mut req = Request::builder().method(parts.method).uri(uri).body(body)?;

        let headers = req.headers_mut();
        *headers = parts.headers;
        strip_hop_by_hop(headers);
        if let Ok(value) = HeaderValue::from_str(request_id) {
            headers.insert(X_REQUEST_ID, value);
        }
        if identity {
            headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));
        }

        tracing::debug!(
            request_id = %request_id,
            origin = %self.authority,
            path = %path_and_query,
            "Forwarding to origin"
        );

        let response = tokio::time::timeout(self.timeout, self.client.request(req))
            .await
            .map_err(|_| OriginError::Timeout(self.timeout))??;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, body))
    }
}

/// Path and query to request from the origin.
///
/// `rewrite_to` replaces the path; the query string is always kept.
pub fn origin_target(uri: &Uri, rewrite_to: Option<&str>) -> String {
    match (rewrite_to, uri.query()) {
        (Some(path), Some(query)) => format!("{}?{}", path, query),
        (Some(path), None) => path.to_string(),
        (None, _) => uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string()),
    }
}
