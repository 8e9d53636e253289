//! Injection statistics

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::decision::ChaosDecision;

/// Point-in-time view of injection counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosStats {
    /// Decisions taken
    pub total_calls: u64,
    /// Decisions that injected latency
    pub latency_injected: u64,
    /// Decisions that injected an error
    pub errors_injected: u64,
    /// Sum of injected delays
    pub total_latency_added_ms: u64,
}

impl ChaosStats {
    /// Fraction of calls that received an injected error
    #[allow(clippy::cast_precision_loss)]
    pub fn actual_error_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.errors_injected as f64 / self.total_calls as f64
        }
    }
}

/// Lock-free counters updated from every request task
#[derive(Debug, Default)]
pub(crate) struct ChaosCounters {
    total_calls: AtomicU64,
    latency_injected: AtomicU64,
    errors_injected: AtomicU64,
    total_latency_added_ms: AtomicU64,
}

impl ChaosCounters {
    pub(crate) fn record(&self, decision: &ChaosDecision) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = decision.delay_ms {
            self.latency_injected.fetch_add(1, Ordering::Relaxed);
            self.total_latency_added_ms
                .fetch_add(delay, Ordering::Relaxed);
        }
        if decision.inject_error {
            self.errors_injected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> ChaosStats {
        ChaosStats {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            latency_injected: self.latency_injected.load(Ordering::Relaxed),
            errors_injected: self.errors_injected.load(Ordering::Relaxed),
            total_latency_added_ms: self.total_latency_added_ms.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_default() {
        let stats = ChaosStats::default();
        assert_eq!(stats.total_calls, 0);
        assert!((stats.actual_error_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn actual_error_rate() {
        let stats = ChaosStats {
            total_calls: 100,
            errors_injected: 25,
            ..Default::default()
        };
        assert!((stats.actual_error_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn counters_accumulate() {
        let counters = ChaosCounters::default();
        counters.record(&ChaosDecision::default());
        counters.record(&ChaosDecision {
            delay_ms: Some(150),
            inject_error: true,
        });
        counters.record(&ChaosDecision {
            delay_ms: Some(50),
            inject_error: false,
        });

        let stats = counters.snapshot();
        assert_eq!(stats.total_calls, 3);
        assert_eq!(stats.latency_injected, 2);
        assert_eq!(stats.errors_injected, 1);
        assert_eq!(stats.total_latency_added_ms, 200);
    }
}
