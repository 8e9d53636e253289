//! Test doubles shared by the service tests

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::ports::{AttributeValue, SpanPort, TracerPort};

#[derive(Debug, Default)]
struct SpanLog {
    started: HashMap<&'static str, usize>,
    ended: HashMap<&'static str, usize>,
    attributes: Vec<(&'static str, &'static str, AttributeValue)>,
    errors: Vec<(&'static str, String)>,
}

/// Tracer that counts span lifecycle events per span name
#[derive(Debug, Default, Clone)]
pub struct RecordingTracer {
    log: Arc<Mutex<SpanLog>>,
}

impl RecordingTracer {
    pub fn started(&self, name: &str) -> usize {
        self.log.lock().started.get(name).copied().unwrap_or(0)
    }

    pub fn ended(&self, name: &str) -> usize {
        self.log.lock().ended.get(name).copied().unwrap_or(0)
    }

    pub fn attribute(&self, span: &str, key: &str) -> Option<AttributeValue> {
        self.log
            .lock()
            .attributes
            .iter()
            .rev()
            .find(|(s, k, _)| *s == span && *k == key)
            .map(|(_, _, v)| v.clone())
    }

    pub fn errors(&self, span: &str) -> Vec<String> {
        self.log
            .lock()
            .errors
            .iter()
            .filter(|(s, _)| *s == span)
            .map(|(_, e)| e.clone())
            .collect()
    }
}

impl TracerPort for RecordingTracer {
    fn start_span(&self, name: &'static str) -> Box<dyn SpanPort> {
        *self.log.lock().started.entry(name).or_default() += 1;
        Box::new(RecordingSpan {
            name,
            log: Arc::clone(&self.log),
        })
    }
}

struct RecordingSpan {
    name: &'static str,
    log: Arc<Mutex<SpanLog>>,
}

impl SpanPort for RecordingSpan {
    fn set_attribute(&mut self, key: &'static str, value: AttributeValue) {
        self.log.lock().attributes.push((self.name, key, value));
    }

    fn record_error(&mut self, message: &str) {
        self.log.lock().errors.push((self.name, message.to_string()));
    }

    fn end(self: Box<Self>) {
        *self.log.lock().ended.entry(self.name).or_default() += 1;
    }
}
