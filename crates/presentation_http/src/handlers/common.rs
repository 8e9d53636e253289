//! Request bodies and helpers shared by the order service and the gateway

use domain::ItemId;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

/// Body of `POST /api/orders`
///
/// Both fields are optional at the JSON level so that a missing field is
/// reported as a validation message rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub item_id: Option<String>,
    pub quantity: Option<i64>,
}

/// Validate an item id taken from the URL path
pub fn parse_item_id(raw: String) -> Result<ItemId, ApiError> {
    Ok(ItemId::new(raw)?)
}
