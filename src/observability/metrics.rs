//! Metrics collection and exposition.
//!
//! # Metrics
//! - `crowdfund_http_requests_total` (counter): requests by route, status
//! - `crowdfund_http_request_duration_seconds` (histogram): latency distribution
//! - `crowdfund_contract_calls_total` (counter): contract calls by method, outcome
//! - `crowdfund_form_rejections_total` (counter): form submissions blocked before the chain
//! - `crowdfund_wallet_connected` (gauge): 1=connected, 0=disconnected
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a completed HTTP request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let labels = [
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("crowdfund_http_requests_total", &labels).increment(1);
    metrics::histogram!("crowdfund_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record a contract call outcome (`ok`, `error`, `not_initialized`).
pub fn record_contract_call(method: &'static str, outcome: &'static str) {
    metrics::counter!(
        "crowdfund_contract_calls_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a form submission rejected before reaching the contract.
pub fn record_form_rejection(form: &'static str, reason: &'static str) {
    metrics::counter!(
        "crowdfund_form_rejections_total",
        "form" => form,
        "reason" => reason
    )
    .increment(1);
}

/// Track wallet connection state.
pub fn record_wallet_connected(connected: bool) {
    metrics::gauge!("crowdfund_wallet_connected").set(if connected { 1.0 } else { 0.0 });
}
