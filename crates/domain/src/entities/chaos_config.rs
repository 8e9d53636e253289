//! Fault-injection parameters for the inventory path
//!
//! A [`ChaosConfig`] is an immutable snapshot. Reconfiguration produces a new
//! snapshot from a validated [`LatencyUpdate`] or [`ErrorRateUpdate`].
//!
//! # Examples
//!
//! ```
//! use domain::{ChaosConfig, LatencyUpdate};
//!
//! let update = LatencyUpdate::new(Some(true), Some(50), Some(150)).unwrap();
//! let config = ChaosConfig::default().with_latency(&update);
//! assert!(config.latency_enabled);
//! assert!(config.check_latency_order().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Current fault-injection settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosConfig {
    pub latency_enabled: bool,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub error_enabled: bool,
    pub error_rate: f64,
}

impl ChaosConfig {
    /// Upper bound for either latency bound, in milliseconds
    pub const MAX_LATENCY_MS: u64 = 10_000;
    pub const DEFAULT_LATENCY_MIN_MS: u64 = 100;
    pub const DEFAULT_LATENCY_MAX_MS: u64 = 2000;
    pub const DEFAULT_ERROR_RATE: f64 = 0.1;

    /// Copy of this config with the given latency fields replaced
    #[must_use]
    pub fn with_latency(&self, update: &LatencyUpdate) -> Self {
        Self {
            latency_enabled: update.enabled.unwrap_or(self.latency_enabled),
            latency_min_ms: update.min_ms.unwrap_or(self.latency_min_ms),
            latency_max_ms: update.max_ms.unwrap_or(self.latency_max_ms),
            ..*self
        }
    }

    /// Copy of this config with the given error-injection fields replaced
    #[must_use]
    pub fn with_error_rate(&self, update: &ErrorRateUpdate) -> Self {
        Self {
            error_enabled: update.enabled.unwrap_or(self.error_enabled),
            error_rate: update.rate.unwrap_or(self.error_rate),
            ..*self
        }
    }

    /// Fails when the minimum latency exceeds the maximum
    pub fn check_latency_order(&self) -> Result<(), DomainError> {
        if self.latency_min_ms > self.latency_max_ms {
            return Err(DomainError::chaos(
                "Min latency cannot be greater than max latency",
            ));
        }
        Ok(())
    }

    /// Full consistency check, used for configuration read at startup
    pub fn validate(&self) -> Result<(), DomainError> {
        check_latency_bound("Min", self.latency_min_ms)?;
        check_latency_bound("Max", self.latency_max_ms)?;
        check_error_rate(self.error_rate)?;
        self.check_latency_order()
    }
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            latency_enabled: false,
            latency_min_ms: Self::DEFAULT_LATENCY_MIN_MS,
            latency_max_ms: Self::DEFAULT_LATENCY_MAX_MS,
            error_enabled: false,
            error_rate: Self::DEFAULT_ERROR_RATE,
        }
    }
}

/// Range-checked request to change latency injection
///
/// Absent fields leave the current value untouched. Construction checks each
/// bound against `[0, 10000]` but not their relative order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyUpdate {
    pub enabled: Option<bool>,
    pub min_ms: Option<u64>,
    pub max_ms: Option<u64>,
}

impl LatencyUpdate {
    pub fn new(
        enabled: Option<bool>,
        min_ms: Option<i64>,
        max_ms: Option<i64>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            enabled,
            min_ms: min_ms.map(|v| latency_bound("Min", v)).transpose()?,
            max_ms: max_ms.map(|v| latency_bound("Max", v)).transpose()?,
        })
    }
}

/// Range-checked request to change error injection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorRateUpdate {
    pub enabled: Option<bool>,
    pub rate: Option<f64>,
}

impl ErrorRateUpdate {
    pub fn new(enabled: Option<bool>, rate: Option<f64>) -> Result<Self, DomainError> {
        if let Some(rate) = rate {
            check_error_rate(rate)?;
        }
        Ok(Self { enabled, rate })
    }
}

fn latency_bound(label: &str, value: i64) -> Result<u64, DomainError> {
    let value = u64::try_from(value).map_err(|_| latency_range_error(label))?;
    check_latency_bound(label, value)?;
    Ok(value)
}

fn check_latency_bound(label: &str, value: u64) -> Result<(), DomainError> {
    if value > ChaosConfig::MAX_LATENCY_MS {
        return Err(latency_range_error(label));
    }
    Ok(())
}

fn latency_range_error(label: &str) -> DomainError {
    DomainError::chaos(format!(
        "{label} latency must be between 0 and {}",
        ChaosConfig::MAX_LATENCY_MS
    ))
}

// NaN fails the range test as well.
fn check_error_rate(rate: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(DomainError::chaos("Error rate must be between 0.0 and 1.0"))
    }
}
