//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wirespec_requests_total` (counter): requests by outcome, status
//! - `wirespec_request_duration_seconds` (histogram): latency by outcome
//! - `wirespec_submissions_total` (counter): submissions by result
//! - `wirespec_mock_generation_fallbacks_total` (counter): `{}` substitutions

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record a finished request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    counter!("wirespec_requests_total", "outcome" => outcome, "status" => status.to_string())
        .increment(1);
    histogram!("wirespec_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a specification submission (`accepted`, `rejected`, `unreadable`).
pub fn record_submission(result: &'static str) {
    counter!("wirespec_submissions_total", "result" => result).increment(1);
}

pub fn record_generation_fallback() {
    counter!("wirespec_mock_generation_fallbacks_total").increment(1);
}
