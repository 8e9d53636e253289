//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod inventory_store;
mod metrics_port;
mod order_store;
mod remote_services;
mod tracer_port;

pub use inventory_store::InventoryStore;
#[cfg(test)]
pub use inventory_store::MockInventoryStore;
#[cfg(test)]
pub use metrics_port::MockMetricsPort;
pub use metrics_port::{MetricsPort, NoopMetrics};
#[cfg(test)]
pub use order_store::MockOrderStore;
pub use order_store::OrderStore;
pub use remote_services::{InventoryServicePort, OrderServicePort};
#[cfg(test)]
pub use remote_services::{MockInventoryServicePort, MockOrderServicePort};
pub use tracer_port::{AttributeValue, NoopSpan, NoopTracer, SpanPort, TracerPort};
