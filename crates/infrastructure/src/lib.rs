//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports: SQLite stores, HTTP clients for the
//! downstream services, the `tracing` span adapter and Prometheus counters.
//! Also owns configuration loading and telemetry setup.

pub mod config;
pub mod http;
pub mod metrics;
pub mod persistence;
pub mod telemetry;

pub use config::{
    AppConfig, ChaosAppConfig, DatabaseConfig, DownstreamServicesConfig, Environment,
    InventorySeedConfig, ServerConfig, ServiceRole, TelemetryAppConfig,
};
pub use http::{
    CorrelatedClientConfig, CorrelatedHttpClient, HttpInventoryClient, HttpOrderClient,
    X_REQUEST_ID, attach_remote_parent, current_request_id, with_request_id,
};
pub use metrics::{MetricsError, PrometheusMetrics, install_prometheus_recorder};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteInventoryStore, SqliteOrderStore, create_pool,
};
pub use telemetry::{TelemetryConfig, TelemetryGuard, TracingTracer, init_telemetry};
