//! Application services - Use case implementations

mod gateway_service;
mod inventory_service;
mod order_service;

pub use gateway_service::{AlertNotification, GatewayService};
pub use inventory_service::InventoryService;
pub use order_service::{ORDERS_CREATED_COUNTER, OrderService};
