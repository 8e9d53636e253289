//! Order storage port

use async_trait::async_trait;
use domain::{NewOrder, Order, OrderId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for order persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order, assigning its identity
    async fn save(&self, order: NewOrder) -> Result<Order, ApplicationError>;

    /// Get an order by ID
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, ApplicationError>;

    /// All orders, oldest first
    async fn find_all(&self) -> Result<Vec<Order>, ApplicationError>;
}
