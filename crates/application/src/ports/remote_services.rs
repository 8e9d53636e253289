//! Ports for the services the gateway calls over the network
//!
//! Implementations translate transport failures into
//! [`ApplicationError::Downstream`]; the gateway decides how each failure is
//! surfaced to its own callers.

use async_trait::async_trait;
use domain::{Availability, ItemId, Order, Quantity};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Remote inventory service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryServicePort: Send + Sync {
    /// Ask the inventory service whether an item is in stock
    async fn check_availability(&self, item_id: &ItemId) -> Result<Availability, ApplicationError>;
}

/// Remote order service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderServicePort: Send + Sync {
    /// Create an order
    async fn create_order(
        &self,
        item_id: &ItemId,
        quantity: Quantity,
    ) -> Result<Order, ApplicationError>;

    /// List all orders
    async fn list_orders(&self) -> Result<Vec<Order>, ApplicationError>;

    /// Fetch one order, `None` when the order service reports it missing
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>, ApplicationError>;
}
