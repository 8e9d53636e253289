//! Runtime-reconfigurable fault injection
//!
//! - [`ChaosController`] owns the live [`domain::ChaosConfig`] and applies
//!   validated reconfiguration requests
//! - [`decide`] turns a config snapshot and a random source into a
//!   [`ChaosDecision`] for one request
//! - [`ChaosStats`] reports what has been injected so far

mod controller;
mod decision;
mod stats;

pub use controller::ChaosController;
pub use decision::{ChaosDecision, decide};
pub use stats::ChaosStats;
