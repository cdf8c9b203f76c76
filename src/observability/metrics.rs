//! Metrics collection and exposition.
//!
//! # Metrics
//! - `etag_responses_total` (counter): responses by `decision`
//!   (`not_modified`, `modified`, `unconditional`)
//! - `etag_buffered_body_bytes` (histogram): size of bodies fingerprinted

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::interceptor::Decision;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(decision: Decision) {
    metrics::counter!("etag_responses_total", "decision" => decision.as_str()).increment(1);
}

pub fn record_buffered_body(len: usize) {
    metrics::histogram!("etag_buffered_body_bytes").record(len as f64);
}
