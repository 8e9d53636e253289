//! Inventory service handlers

use axum::{
    Json,
    extract::{Path, State},
};
use domain::Availability;

use super::common::parse_item_id;
use crate::{error::ApiError, state::InventoryState};

/// `GET /api/inventory/{itemId}`
pub async fn check_inventory(
    State(state): State<InventoryState>,
    Path(item_id): Path<String>,
) -> Result<Json<Availability>, ApiError> {
    let item_id = parse_item_id(item_id)?;
    let availability = state.inventory.check(&item_id).await?;
    Ok(Json(availability))
}
