//! Prometheus metrics adapter
//!
//! Counters go through the `metrics` facade; a process-wide Prometheus
//! recorder renders them for the `/metrics` endpoint.

use application::{ORDERS_CREATED_COUNTER, ports::MetricsPort};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

/// Error installing the metrics recorder
#[derive(Debug, thiserror::Error)]
#[error("Failed to install Prometheus recorder: {0}")]
pub struct MetricsError(String);

/// Install the global Prometheus recorder and describe known counters
///
/// Can only succeed once per process.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError(e.to_string()))?;

    describe_counter!(ORDERS_CREATED_COUNTER, "Orders persisted by the order service");
    Ok(handle)
}

/// [`MetricsPort`] backed by the `metrics` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusMetrics;

impl MetricsPort for PrometheusMetrics {
    fn increment_counter(&self, name: &str) {
        debug!(counter = name, "Incrementing counter");
        counter!(name.to_owned()).increment(1);
    }
}
