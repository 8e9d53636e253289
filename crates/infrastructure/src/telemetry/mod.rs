//! Telemetry and distributed tracing infrastructure
//!
//! Sets up the `tracing` subscriber with optional OTLP export and provides
//! the span adapter the application services trace through.

mod otel;
mod tracer;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
pub use tracer::{TracingSpan, TracingTracer};
