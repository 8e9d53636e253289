//! Gateway handlers
//!
//! Order creation runs the inventory-then-order flow; the read endpoints
//! forward to the downstream services.

use application::AlertNotification;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Availability, Order};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{CreateOrderRequest, parse_item_id};
use crate::{error::ApiError, middleware::ValidatedJson, state::GatewayState};

/// `POST /api/orders`
pub async fn create_order(
    State(state): State<GatewayState>,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .gateway
        .create_order(req.item_id.as_deref(), req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
pub async fn list_orders(State(state): State<GatewayState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.gateway.list_orders().await?))
}

/// `GET /api/orders/{id}`
pub async fn get_order(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    state
        .gateway
        .get_order(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))
}

/// `GET /api/inventory/{itemId}`
pub async fn check_inventory(
    State(state): State<GatewayState>,
    Path(item_id): Path<String>,
) -> Result<Json<Availability>, ApiError> {
    let item_id = parse_item_id(item_id)?;
    Ok(Json(state.gateway.check_inventory(&item_id).await?))
}

/// Alertmanager webhook body; keys other than these are ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AlertWebhookRequest {
    #[serde(default)]
    #[validate(length(max = 64, message = "status is too long"))]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "too many alerts"))]
    pub alerts: Vec<serde_json::Value>,
}

/// Acknowledgement returned to Alertmanager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertWebhookResponse {
    pub status: String,
    pub message: String,
}

/// `POST /api/alerts/webhook`
pub async fn receive_alert_webhook(
    State(state): State<GatewayState>,
    ValidatedJson(req): ValidatedJson<AlertWebhookRequest>,
) -> Json<AlertWebhookResponse> {
    let notification = AlertNotification {
        status: req.status,
        alerts: req.alerts,
    };
    state.gateway.receive_alerts(&notification);

    Json(AlertWebhookResponse {
        status: "received".to_string(),
        message: "Alert webhook processed successfully".to_string(),
    })
}
