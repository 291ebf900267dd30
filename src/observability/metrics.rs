//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inertia_responses_total` (counter): responses by kind (json, html) and status
//! - `inertia_status_rewrites_total` (counter): 302 → 303 rewrites by method
//! - `inertia_version_conflicts_total` (counter): 409s caused by stale assets
//! - `inertia_shared_props_reaped_total` (counter): entries reclaimed by the reaper
//! - `inertia_shared_props_entries` (gauge): requests currently holding shared props

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_response(kind: &'static str, status: u16) {
    ::metrics::counter!(
        "inertia_responses_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_status_rewrite(method: &str) {
    ::metrics::counter!("inertia_status_rewrites_total", "method" => method.to_string()).increment(1);
}

pub fn record_version_conflict() {
    ::metrics::counter!("inertia_version_conflicts_total").increment(1);
}

pub fn record_reaped(count: usize) {
    ::metrics::counter!("inertia_shared_props_reaped_total").increment(count as u64);
}

pub fn record_shared_entries(count: usize) {
    ::metrics::gauge!("inertia_shared_props_entries").set(count as f64);
}
