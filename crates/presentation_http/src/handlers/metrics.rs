//! Prometheus metrics handlers
//!
//! Counters recorded through the `metrics` facade are rendered by the
//! installed recorder. The inventory service also reports its chaos settings
//! and injection counters, which are sampled into a scrape-local recorder.

use application::ChaosStats;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use domain::ChaosConfig;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::state::{InventoryState, ServiceInfo};

const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

fn render_recorder(info: &ServiceInfo) -> String {
    info.prometheus
        .as_ref()
        .map(metrics_exporter_prometheus::PrometheusHandle::render)
        .unwrap_or_default()
}

#[allow(clippy::cast_precision_loss)]
fn record_chaos(config: &ChaosConfig, stats: &ChaosStats) {
    describe_counter!(
        "chaos_calls_total",
        "Inventory lookups that consulted the chaos controller"
    );
    describe_counter!("chaos_latency_injected_total", "Lookups delayed by injected latency");
    describe_counter!("chaos_errors_injected_total", "Lookups failed by an injected error");
    describe_counter!(
        "chaos_latency_added_ms_total",
        "Sum of injected delays in milliseconds"
    );
    describe_gauge!("chaos_latency_enabled", "Whether latency injection is enabled");
    describe_gauge!("chaos_latency_min_ms", "Lower bound of injected latency");
    describe_gauge!("chaos_latency_max_ms", "Upper bound of injected latency");
    describe_gauge!("chaos_error_enabled", "Whether error injection is enabled");
    describe_gauge!("chaos_error_rate", "Configured error injection probability");
    describe_gauge!(
        "chaos_error_rate_observed",
        "Share of decisions that injected an error"
    );

    counter!("chaos_calls_total").absolute(stats.total_calls);
    counter!("chaos_latency_injected_total").absolute(stats.latency_injected);
    counter!("chaos_errors_injected_total").absolute(stats.errors_injected);
    counter!("chaos_latency_added_ms_total").absolute(stats.total_latency_added_ms);

    gauge!("chaos_latency_enabled").set(u8::from(config.latency_enabled));
    gauge!("chaos_latency_min_ms").set(config.latency_min_ms as f64);
    gauge!("chaos_latency_max_ms").set(config.latency_max_ms as f64);
    gauge!("chaos_error_enabled").set(u8::from(config.error_enabled));
    gauge!("chaos_error_rate").set(config.error_rate);
    gauge!("chaos_error_rate_observed").set(stats.actual_error_rate());
}

/// Prometheus text for the chaos settings and counters
///
/// The values are owned by the chaos controller, so each scrape samples them
/// into a fresh recorder instead of the process-wide one.
pub fn render_chaos(config: &ChaosConfig, stats: &ChaosStats) -> String {
    let recorder = PrometheusBuilder::new().build_recorder();
    metrics::with_local_recorder(&recorder, || record_chaos(config, stats));
    recorder.handle().render()
}

/// `GET /metrics`
pub async fn get_metrics(State(info): State<ServiceInfo>) -> Response {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], render_recorder(&info)).into_response()
}

/// `GET /metrics` on the inventory service
pub async fn get_inventory_metrics(State(state): State<InventoryState>) -> Response {
    let chaos = state.chaos();
    let mut output = render_recorder(&state.info);
    output.push_str(&render_chaos(&chaos.snapshot(), &chaos.stats()));

    ([(header::CONTENT_TYPE, CONTENT_TYPE)], output).into_response()
}
