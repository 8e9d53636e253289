//! Domain entities

mod chaos_config;
mod inventory;
mod order;

pub use chaos_config::{ChaosConfig, ErrorRateUpdate, LatencyUpdate};
pub use inventory::{Availability, InventoryItem};
pub use order::{NewOrder, Order};
