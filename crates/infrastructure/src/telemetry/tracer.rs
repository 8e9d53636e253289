//! `tracing`-backed implementation of the tracer port
//!
//! Spans carry `otel.name` so the OpenTelemetry layer exports them under the
//! operation name. Without that layer installed they still show up in the
//! console logs.

use application::ports::{AttributeValue, SpanPort, TracerPort};
use opentelemetry::Value;
use tracing::{Span, field::Empty};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Opens `tracing` spans for application services
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracer;

impl TracerPort for TracingTracer {
    fn start_span(&self, name: &'static str) -> Box<dyn SpanPort> {
        let span = tracing::info_span!(
            "operation",
            otel.name = name,
            otel.status_code = Empty,
            otel.status_message = Empty,
        );
        Box::new(TracingSpan { span })
    }
}

/// One open `tracing` span; closes when dropped
#[derive(Debug)]
pub struct TracingSpan {
    span: Span,
}

fn to_otel_value(value: AttributeValue) -> Value {
    match value {
        AttributeValue::Str(v) => Value::from(v),
        AttributeValue::Int(v) => Value::I64(v),
        AttributeValue::Float(v) => Value::F64(v),
        AttributeValue::Bool(v) => Value::Bool(v),
    }
}

impl SpanPort for TracingSpan {
    fn set_attribute(&mut self, key: &'static str, value: AttributeValue) {
        tracing::trace!(parent: &self.span, key, value = %value, "span attribute");
        self.span.set_attribute(key, to_otel_value(value));
    }

    fn record_error(&mut self, message: &str) {
        self.span.record("otel.status_code", "ERROR");
        self.span.record("otel.status_message", message);
        tracing::error!(parent: &self.span, error = %message, "operation failed");
    }

    fn end(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_lifecycle_without_subscriber() {
        let tracer = TracingTracer;
        let mut span = tracer.start_span("check-inventory");
        span.set_attribute("inventory.item_id", "sku-1".into());
        span.set_attribute("chaos.latency_ms", 250u64.into());
        span.set_attribute("inventory.available", true.into());
        span.record_error("Chaos error injected");
        span.end();
    }

    #[test]
    fn converts_attribute_values() {
        assert_eq!(to_otel_value(AttributeValue::Int(3)), Value::I64(3));
        assert_eq!(to_otel_value(AttributeValue::Bool(false)), Value::Bool(false));
        assert_eq!(to_otel_value("x".into()), Value::from("x"));
    }
}
