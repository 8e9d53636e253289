//! Inventory records and the availability view derived from them

use serde::{Deserialize, Serialize};

use crate::value_objects::ItemId;

/// A stocked item as held by the inventory store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Identity of the item
    pub item_id: ItemId,
    /// Display name
    pub name: String,
    /// Units on hand
    pub quantity: u32,
}

impl InventoryItem {
    /// Quantity reported for items the store has never heard of
    pub const PLACEHOLDER_QUANTITY: u32 = 100;

    /// Create an inventory record
    pub fn new(item_id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id,
            name: name.into(),
            quantity,
        }
    }

    /// Synthesize the record used when the store has no entry for `item_id`
    pub fn placeholder(item_id: ItemId) -> Self {
        let name = format!("Item {item_id}");
        Self::new(item_id, name, Self::PLACEHOLDER_QUANTITY)
    }

    /// Whether at least one unit is on hand
    pub const fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Derive the availability answer for this record
    pub fn availability(&self) -> Availability {
        Availability {
            item_id: self.item_id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            available: self.is_available(),
        }
    }
}

/// Availability answer returned by the inventory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub available: bool,
}

impl From<InventoryItem> for Availability {
    fn from(item: InventoryItem) -> Self {
        let available = item.is_available();
        Self {
            item_id: item.item_id,
            name: item.name,
            quantity: item.quantity,
            available,
        }
    }
}
