//! Metrics collection.
//!
//! # Metrics
//! - `connectivity_probes_total` (counter): probes by server, status
//! - `connectivity_probe_duration_seconds` (histogram): probe latency by server

use std::time::Instant;

use crate::status::NetworkStatus;

pub const PROBES_TOTAL: &str = "connectivity_probes_total";
pub const PROBE_DURATION_SECONDS: &str = "connectivity_probe_duration_seconds";

/// Record the outcome of one probe.
pub fn record_probe(server: &str, status: NetworkStatus, started: Instant) {
    let server = server.to_string();
    ::metrics::counter!(PROBES_TOTAL, "server" => server.clone(), "status" => status.as_str())
        .increment(1);
    ::metrics::histogram!(PROBE_DURATION_SECONDS, "server" => server)
        .record(started.elapsed().as_secs_f64());
}
