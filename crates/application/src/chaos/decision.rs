//! Per-request fault decision

use domain::ChaosConfig;
use rand::Rng;

/// What to inject into one inventory lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChaosDecision {
    /// Artificial delay, present only when latency injection is enabled
    pub delay_ms: Option<u64>,
    /// Fail the lookup with a simulated error
    pub inject_error: bool,
}

impl ChaosDecision {
    /// Whether anything will be injected
    pub const fn is_fault(&self) -> bool {
        self.delay_ms.is_some() || self.inject_error
    }
}

/// Draw a decision from `config` using `rng`
///
/// The delay is uniform over `[latency_min_ms, latency_max_ms)`. An empty or
/// inverted range yields exactly `latency_min_ms`. An error is injected when
/// a uniform draw from `[0, 1)` falls below `error_rate`.
pub fn decide<R: Rng>(config: &ChaosConfig, rng: &mut R) -> ChaosDecision {
    let delay_ms = config.latency_enabled.then(|| {
        if config.latency_min_ms < config.latency_max_ms {
            rng.random_range(config.latency_min_ms..config.latency_max_ms)
        } else {
            config.latency_min_ms
        }
    });
    let inject_error = config.error_enabled && rng.random::<f64>() < config.error_rate;

    ChaosDecision {
        delay_ms,
        inject_error,
    }
}
