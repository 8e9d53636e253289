//! Inventory storage port
//!
//! Read access to stocked items. Writes happen outside the request path
//! (seeding, external stock management).

use async_trait::async_trait;
use domain::{InventoryItem, ItemId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for looking up inventory records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Find the record for an item, `None` when the item is unknown
    async fn find_by_id(&self, item_id: &ItemId) -> Result<Option<InventoryItem>, ApplicationError>;
}
