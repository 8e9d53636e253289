//! Order entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{ItemId, OrderId, OrderStatus, Quantity},
};

/// An order that has been validated but not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub item_id: ItemId,
    pub quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Create a pending order stamped with the current time
    pub fn pending(item_id: ItemId, quantity: Quantity) -> Self {
        Self {
            item_id,
            quantity,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Validate raw request fields into a pending order
    ///
    /// Presence is checked before ranges so that a request missing either
    /// field always reports the same error.
    pub fn from_request(item_id: Option<&str>, quantity: Option<i64>) -> Result<Self, DomainError> {
        let (Some(item_id), Some(quantity)) = (item_id, quantity) else {
            return Err(DomainError::MissingFields("itemId and quantity".to_string()));
        };
        let quantity = Quantity::new(quantity)?;
        let item_id = ItemId::new(item_id)?;
        Ok(Self::pending(item_id, quantity))
    }

    /// Attach the identity assigned by the store
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            item_id: self.item_id,
            quantity: self.quantity,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// A persisted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub item_id: ItemId,
    pub quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_request_builds_pending_order() {
        let order = NewOrder::from_request(Some("sku-1"), Some(5)).unwrap();
        assert_eq!(order.item_id.as_str(), "sku-1");
        assert_eq!(order.quantity.value(), 5);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn missing_fields_reported_together() {
        for (item, qty) in [(None, Some(1)), (Some("a"), None), (None, None)] {
            assert_eq!(
                NewOrder::from_request(item, qty),
                Err(DomainError::MissingFields("itemId and quantity".to_string()))
            );
        }
    }

    #[test]
    fn quantity_checked_before_item_id() {
        let err = NewOrder::from_request(Some(""), Some(0)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity { .. }));
    }

    #[test]
    fn blank_item_id_rejected() {
        assert_eq!(
            NewOrder::from_request(Some("  "), Some(1)),
            Err(DomainError::InvalidItemId)
        );
    }

    #[test]
    fn with_id_keeps_fields() {
        let draft = NewOrder::from_request(Some("sku-1"), Some(2)).unwrap();
        let created_at = draft.created_at;
        let id = OrderId::new();
        let order = draft.with_id(id);
        assert_eq!(order.id, id);
        assert_eq!(order.created_at, created_at);
    }

    #[test]
    fn order_serializes_camel_case() {
        let order = NewOrder::from_request(Some("sku-1"), Some(2))
            .unwrap()
            .with_id(OrderId::new());
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["itemId"], "sku-1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["status"], "PENDING");
        assert!(json["createdAt"].is_string());
    }
}
