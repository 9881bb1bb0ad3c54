//! Metrics collection and exposition.
//!
//! # Metrics
//! - `udp_health_probes_total` (counter): probes by outcome
//! - `udp_health_probe_duration_seconds` (histogram): probe latency
//! - `udp_health_rate_limited_total` (counter): requests refused by the limiter
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::probe::ProbeOutcome;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_probe(outcome: ProbeOutcome, start: Instant) {
    metrics::counter!("udp_health_probes_total", "outcome" => outcome.as_str()).increment(1);
    metrics::histogram!("udp_health_probe_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    metrics::counter!("udp_health_rate_limited_total").increment(1);
}
