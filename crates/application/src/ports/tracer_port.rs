//! Tracing capability port
//!
//! Services open spans through [`TracerPort`] instead of talking to a tracing
//! SDK directly. When tracing is switched off the [`NoopTracer`] is wired in,
//! so call sites never branch on whether a tracer exists.

use std::fmt;

/// Attribute value attached to a span
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => f.write_str(v),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for AttributeValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for AttributeValue {
    fn from(v: u64) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// One open span
///
/// `end` consumes the span, so a span can be closed at most once.
pub trait SpanPort: Send {
    /// Attach a key/value attribute
    fn set_attribute(&mut self, key: &'static str, value: AttributeValue);

    /// Record an error event and mark the span as failed
    fn record_error(&mut self, message: &str);

    /// Close the span
    fn end(self: Box<Self>);
}

/// Factory for spans
pub trait TracerPort: Send + Sync {
    /// Open a span with the given operation name
    fn start_span(&self, name: &'static str) -> Box<dyn SpanPort>;
}

/// Tracer used when tracing is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl TracerPort for NoopTracer {
    fn start_span(&self, _name: &'static str) -> Box<dyn SpanPort> {
        Box::new(NoopSpan)
    }
}

/// Span that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

impl SpanPort for NoopSpan {
    fn set_attribute(&mut self, _key: &'static str, _value: AttributeValue) {}

    fn record_error(&mut self, _message: &str) {}

    fn end(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracer_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TracerPort>();
        let tracer: &dyn TracerPort = &NoopTracer;
        let mut span = tracer.start_span("noop");
        span.set_attribute("k", "v".into());
        span.record_error("ignored");
        span.end();
    }

    #[test]
    fn attribute_conversions() {
        assert_eq!(AttributeValue::from("a"), AttributeValue::Str("a".into()));
        assert_eq!(AttributeValue::from(7u32), AttributeValue::Int(7));
        assert_eq!(AttributeValue::from(u64::MAX), AttributeValue::Int(i64::MAX));
        assert_eq!(AttributeValue::from(true), AttributeValue::Bool(true));
        assert_eq!(AttributeValue::from(1500u64).to_string(), "1500");
    }
}
