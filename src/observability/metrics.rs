//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define checker metrics (probe outcomes, check latency, peer links)
//! - Render a Prometheus text snapshot at exit
//!
//! # Metrics
//! - `healthcheck_probe_total` (counter): liveness probes by service, outcome
//! - `healthcheck_probe_duration_seconds` (histogram): liveness probe latency
//! - `healthcheck_check_duration_seconds` (histogram): basic/full check latency
//! - `healthcheck_peer_cluster_connected` (gauge): 1=connected, 0=disconnected
//!
//! # Design Decisions
//! - Facade calls are no-ops until a recorder is installed
//! - No scrape endpoint; the snapshot is written to a file for a
//!   node-exporter textfile collector

use std::path::Path;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::config::ServiceKind;

/// Result label of one liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Serving,
    Unhealthy,
    Error,
}

impl ProbeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Serving => "serving",
            ProbeOutcome::Unhealthy => "unhealthy",
            ProbeOutcome::Error => "error",
        }
    }
}

/// Install the global Prometheus recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Write the current exposition text to `path`.
pub fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, handle.render())
}

pub fn record_probe(service: ServiceKind, outcome: ProbeOutcome, start: Instant) {
    counter!(
        "healthcheck_probe_total",
        "service" => service.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    histogram!("healthcheck_probe_duration_seconds", "service" => service.as_str())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_check_duration(check: &'static str, start: Instant) {
    histogram!("healthcheck_check_duration_seconds", "check" => check)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_peer_cluster(cluster: &str, connected: bool) {
    gauge!("healthcheck_peer_cluster_connected", "cluster" => cluster.to_string())
        .set(if connected { 1.0 } else { 0.0 });
}
