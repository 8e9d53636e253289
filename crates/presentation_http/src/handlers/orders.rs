//! Order service handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::Order;

use super::common::CreateOrderRequest;
use crate::{error::ApiError, middleware::ValidatedJson, state::OrderState};

/// `POST /api/orders`
pub async fn create_order(
    State(state): State<OrderState>,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .orders
        .create_order(req.item_id.as_deref(), req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
pub async fn list_orders(State(state): State<OrderState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_orders().await?))
}

/// `GET /api/orders/{id}`
pub async fn get_order(
    State(state): State<OrderState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .get_order(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))
}
