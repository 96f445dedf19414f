//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_rejections_total` (counter): rejected requests by reason
//! - `relay_rate_limited_total` (counter): requests dropped by the limiter
//! - `relay_forwarded_total` (counter): upstream deliveries by outcome
//! - `relay_forward_duration_seconds` (histogram): pipeline latency for
//!   requests that reached the forwarder

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with an exposition listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_rejection(reason: &'static str) {
    counter!("relay_rejections_total", "reason" => reason).increment(1);
}

pub fn record_rate_limited() {
    counter!("relay_rate_limited_total").increment(1);
}

pub fn record_forwarded(ok: bool, start: Instant) {
    let outcome = if ok { "delivered" } else { "upstream_error" };
    counter!("relay_forwarded_total", "outcome" => outcome).increment(1);
    histogram!("relay_forward_duration_seconds").record(start.elapsed().as_secs_f64());
}
