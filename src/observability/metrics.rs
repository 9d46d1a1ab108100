//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by function, status
//! - `edge_request_duration_seconds` (histogram): latency by function
//! - `edge_post_fetch_total` (counter): post API outcomes
//! - `edge_meta_injected_total` (counter): rewritten pages by mode
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record one handled request.
pub fn record_request(function: &str, status: u16, start: Instant) {
    metrics::counter!(
        "edge_requests_total",
        "function" => function.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("edge_request_duration_seconds", "function" => function.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a post API call.
pub fn record_post_fetch(outcome: &'static str) {
    metrics::counter!("edge_post_fetch_total", "outcome" => outcome).increment(1);
}

/// Record a page rewritten with `mode`.
pub fn record_meta_injected(mode: &'static str) {
    metrics::counter!("edge_meta_injected_total", "mode" => mode).increment(1);
}
