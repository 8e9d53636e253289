//! Metrics sink port

#[cfg(test)]
use mockall::automock;

/// Port for counting business events
#[cfg_attr(test, automock)]
pub trait MetricsPort: Send + Sync {
    /// Increment the named counter by one
    fn increment_counter(&self, name: &str);
}

/// Metrics sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsPort for NoopMetrics {
    fn increment_counter(&self, _name: &str) {}
}
