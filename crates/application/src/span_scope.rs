//! Scoped span ownership
//!
//! [`ScopedSpan`] closes its span when dropped, so early returns, `?`
//! propagation and cancelled futures all end the span exactly once.

use crate::ports::{AttributeValue, SpanPort, TracerPort};

/// Owns one open span until it goes out of scope
pub struct ScopedSpan {
    span: Option<Box<dyn SpanPort>>,
}

impl std::fmt::Debug for ScopedSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedSpan")
            .field("open", &self.span.is_some())
            .finish()
    }
}

impl ScopedSpan {
    /// Open a span on `tracer`
    pub fn start(tracer: &dyn TracerPort, name: &'static str) -> Self {
        Self {
            span: Some(tracer.start_span(name)),
        }
    }

    pub fn set_attribute(&mut self, key: &'static str, value: impl Into<AttributeValue>) {
        if let Some(span) = self.span.as_mut() {
            span.set_attribute(key, value.into());
        }
    }

    pub fn record_error(&mut self, message: &str) {
        if let Some(span) = self.span.as_mut() {
            span.record_error(message);
        }
    }

    /// Close the span now instead of at end of scope
    pub fn end(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Some(span) = self.span.take() {
            span.end();
        }
    }
}

impl Drop for ScopedSpan {
    fn drop(&mut self) {
        self.close();
    }
}
