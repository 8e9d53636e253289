//! OpenTelemetry initialization and configuration
//!
//! Builds the subscriber stack (env filter, console output, optional OTLP
//! layer) and installs the W3C trace-context propagator so incoming
//! `traceparent` headers continue the caller's trace.
//! Falls back to console-only logging when the collector cannot be set up.

use std::time::Duration;

use opentelemetry::{global, trace::TracerProvider as _};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{Sampler, SdkTracerProvider},
};
use tracing::{info, warn};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TelemetryAppConfig;

/// Resolved telemetry settings for one process
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Whether OTLP export is enabled
    pub enabled: bool,

    /// OTLP gRPC endpoint
    pub endpoint: String,

    /// `service.name` resource attribute
    pub service_name: String,

    /// Root sampling ratio (0.0 - 1.0); child spans follow their parent
    pub sampling_ratio: f64,

    /// Export timeout
    pub export_timeout: Duration,

    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Emit console logs as JSON lines
    pub json_logs: bool,

    /// Continue with console-only logging if the exporter cannot be built
    pub graceful_fallback: bool,
}

impl TelemetryConfig {
    /// Derive settings from the application config section
    pub fn from_app_config(
        config: &TelemetryAppConfig,
        service_name: impl Into<String>,
        json_logs: bool,
    ) -> Self {
        Self {
            enabled: config.enabled,
            endpoint: config.otlp_endpoint.clone(),
            service_name: service_name.into(),
            sampling_ratio: config.sample_ratio.unwrap_or(1.0).clamp(0.0, 1.0),
            export_timeout: Duration::from_secs(10),
            log_filter: config.log_filter.clone(),
            json_logs,
            graceful_fallback: config.graceful_fallback,
        }
    }

    fn sampler(&self) -> Sampler {
        let root = if (self.sampling_ratio - 1.0).abs() < f64::EPSILON {
            Sampler::AlwaysOn
        } else if self.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(self.sampling_ratio)
        };
        Sampler::ParentBased(Box::new(root))
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_app_config(&TelemetryAppConfig::default(), "fulfillment", false)
    }
}

/// Guard that shuts down the tracer provider when dropped
///
/// Dropping flushes spans still queued in the batch exporter.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("active", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!("Failed to shutdown tracer provider: {:?}", e);
            }
        }
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to install the tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to create the OTLP exporter
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),
}

fn build_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.endpoint)
        .with_timeout(config.export_timeout)
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(config.sampler())
        .with_resource(resource)
        .build())
}

/// Initialize logging and tracing for the process
///
/// Keep the returned guard alive until shutdown.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    };

    let mut fallback = None;
    let provider = if config.enabled {
        match build_provider(config) {
            Ok(provider) => Some(provider),
            Err(e) if config.graceful_fallback => {
                fallback = Some(e);
                None
            },
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| OpenTelemetryLayer::new(p.tracer(config.service_name.clone())));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    match (&provider, fallback) {
        (Some(_), _) => info!(
            endpoint = %config.endpoint,
            service = %config.service_name,
            sampling = %config.sampling_ratio,
            "Telemetry initialized with OTLP export"
        ),
        (None, Some(e)) => warn!(
            endpoint = %config.endpoint,
            error = %e,
            "OTLP exporter unavailable, falling back to console-only logging"
        ),
        (None, None) => info!(service = %config.service_name, "Telemetry initialized (console only)"),
    }

    Ok(TelemetryGuard { provider })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_app_config_clamps_ratio() {
        let app = TelemetryAppConfig {
            sample_ratio: Some(3.0),
            ..TelemetryAppConfig::default()
        };
        let config = TelemetryConfig::from_app_config(&app, "inventory-service", true);

        assert_eq!(config.service_name, "inventory-service");
        assert!((config.sampling_ratio - 1.0).abs() < f64::EPSILON);
        assert!(config.json_logs);
        assert!(config.graceful_fallback);
        assert!(!config.enabled);
    }

    #[test]
    fn missing_ratio_samples_everything() {
        let app = TelemetryAppConfig {
            sample_ratio: None,
            ..TelemetryAppConfig::default()
        };
        let config = TelemetryConfig::from_app_config(&app, "order-service", false);
        assert!(matches!(config.sampler(), Sampler::ParentBased(_)));
        assert!((config.sampling_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_endpoint() {
        let config = TelemetryConfig::default();
        assert_eq!(config.endpoint, "http://localhost:4317");
        assert_eq!(config.service_name, "fulfillment");
    }

    #[test]
    fn guard_without_provider_drops_cleanly() {
        let guard = TelemetryGuard { provider: None };
        assert!(!guard.is_exporting());
        drop(guard);
    }
}
