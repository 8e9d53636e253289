//! Live chaos configuration shared by all request tasks

use std::sync::Arc;

use arc_swap::ArcSwap;
use domain::{ChaosConfig, ErrorRateUpdate, LatencyUpdate};
use parking_lot::Mutex;
use rand::Rng;
use tracing::{info, warn};

use super::{
    decision::{ChaosDecision, decide},
    stats::{ChaosCounters, ChaosStats},
};
use crate::error::ApplicationError;

/// Holds the process-wide [`ChaosConfig`]
///
/// Readers load an immutable snapshot without locking. Writers are
/// serialized by a mutex and publish a whole new snapshot, so a reader never
/// sees a mix of old and new fields.
#[derive(Debug)]
pub struct ChaosController {
    config: ArcSwap<ChaosConfig>,
    write_lock: Mutex<()>,
    counters: ChaosCounters,
}

impl Default for ChaosController {
    fn default() -> Self {
        Self::new(ChaosConfig::default())
    }
}

impl ChaosController {
    /// Create a controller starting from `initial`
    pub fn new(initial: ChaosConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(initial),
            write_lock: Mutex::new(()),
            counters: ChaosCounters::default(),
        }
    }

    /// Current configuration
    pub fn snapshot(&self) -> ChaosConfig {
        **self.config.load()
    }

    /// Injection counters so far
    pub fn stats(&self) -> ChaosStats {
        self.counters.snapshot()
    }

    /// Change latency injection
    ///
    /// Each given bound must lie in `[0, 10000]`; otherwise nothing changes.
    /// The new values are then stored, and only afterwards is `min <= max`
    /// checked. An inverted range is therefore reported as `InvalidConfig`
    /// while remaining the live configuration.
    pub fn configure_latency(
        &self,
        enabled: Option<bool>,
        min_ms: Option<i64>,
        max_ms: Option<i64>,
    ) -> Result<ChaosConfig, ApplicationError> {
        let update = LatencyUpdate::new(enabled, min_ms, max_ms)?;

        let _guard = self.write_lock.lock();
        let next = self.snapshot().with_latency(&update);
        self.config.store(Arc::new(next));

        info!(
            enabled = next.latency_enabled,
            min_ms = next.latency_min_ms,
            max_ms = next.latency_max_ms,
            "Chaos latency configured"
        );

        next.check_latency_order().map_err(|e| {
            warn!(
                min_ms = next.latency_min_ms,
                max_ms = next.latency_max_ms,
                "Latency range stored with min above max"
            );
            ApplicationError::from(e)
        })?;
        Ok(next)
    }

    /// Change error injection
    ///
    /// The rate is checked before anything is stored.
    pub fn configure_errors(
        &self,
        enabled: Option<bool>,
        rate: Option<f64>,
    ) -> Result<ChaosConfig, ApplicationError> {
        let update = ErrorRateUpdate::new(enabled, rate)?;

        let _guard = self.write_lock.lock();
        let next = self.snapshot().with_error_rate(&update);
        self.config.store(Arc::new(next));

        info!(
            enabled = next.error_enabled,
            rate = next.error_rate,
            "Chaos errors configured"
        );
        Ok(next)
    }

    /// Draw a decision for one request using the thread-local generator
    pub fn decide(&self) -> ChaosDecision {
        self.decide_with(&mut rand::rng())
    }

    /// Draw a decision for one request using `rng`
    pub fn decide_with<R: Rng>(&self, rng: &mut R) -> ChaosDecision {
        let config = self.config.load();
        let decision = decide(&config, rng);
        self.counters.record(&decision);
        decision
    }
}
