//! Domain layer for the fulfillment services
//!
//! Contains entities, value objects, and domain errors shared by the gateway,
//! inventory and order services. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
