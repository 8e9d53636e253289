//! Application layer - Use cases and orchestration
//!
//! Hosts the fault-injection controller, the inventory lookup, order
//! creation and the gateway orchestration, plus the ports through which they
//! reach storage, telemetry and the downstream services.

pub mod chaos;
pub mod error;
pub mod ports;
pub mod sanitize;
pub mod services;
pub mod span_scope;

#[cfg(test)]
pub(crate) mod testing;

pub use chaos::{ChaosController, ChaosDecision, ChaosStats};
pub use error::ApplicationError;
pub use ports::*;
pub use sanitize::sanitize_for_log;
pub use services::*;
pub use span_scope::ScopedSpan;
