//! Gateway orchestration across the inventory and order services

use std::sync::Arc;

use domain::{Availability, DomainError, ItemId, NewOrder, Order, is_acceptable_identifier};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{InventoryServicePort, OrderServicePort, TracerPort},
    sanitize::sanitize_for_log,
    span_scope::ScopedSpan,
};

/// Alertmanager-style webhook payload; unknown keys are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertNotification {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
}

/// Front door for clients: fans out to the inventory and order services
pub struct GatewayService {
    inventory: Arc<dyn InventoryServicePort>,
    orders: Arc<dyn OrderServicePort>,
    tracer: Arc<dyn TracerPort>,
}

impl std::fmt::Debug for GatewayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayService").finish_non_exhaustive()
    }
}

impl GatewayService {
    /// Create a new gateway service
    pub fn new(
        inventory: Arc<dyn InventoryServicePort>,
        orders: Arc<dyn OrderServicePort>,
        tracer: Arc<dyn TracerPort>,
    ) -> Self {
        Self {
            inventory,
            orders,
            tracer,
        }
    }

    /// Check inventory, then create the order
    ///
    /// The order service is only called after the inventory service reports
    /// the item as available. Nothing is compensated if order creation fails
    /// after a successful check, since the check mutates nothing.
    #[instrument(skip(self, item_id), fields(item_id = %sanitize_for_log(item_id)))]
    pub async fn create_order(
        &self,
        item_id: Option<&str>,
        quantity: Option<i64>,
    ) -> Result<Order, ApplicationError> {
        let request = NewOrder::from_request(item_id, quantity)?;

        let mut span = ScopedSpan::start(self.tracer.as_ref(), "create-order-flow");
        span.set_attribute("item.id", request.item_id.as_str());

        let result = self.run_order_flow(&request).await;

        match &result {
            Ok(order) => {
                span.set_attribute("order.status", "success");
                info!(order_id = %order.id, "Order flow completed");
            },
            Err(e) => {
                span.set_attribute("order.status", "error");
                span.record_error(&e.to_string());
                warn!(error = %e, kind = e.kind(), "Order flow failed");
            },
        }
        result
    }

    async fn run_order_flow(&self, request: &NewOrder) -> Result<Order, ApplicationError> {
        let availability = self
            .inventory
            .check_availability(&request.item_id)
            .await
            .map_err(|e| ApplicationError::InventoryUnavailable(e.to_string()))?;

        if !availability.available {
            return Err(ApplicationError::InventoryUnavailable(format!(
                "item {} is out of stock",
                sanitize_for_log(request.item_id.as_str())
            )));
        }

        self.orders
            .create_order(&request.item_id, request.quantity)
            .await
            .map_err(|e| match e {
                ApplicationError::Downstream(_) => e,
                other => ApplicationError::Downstream(other.to_string()),
            })
    }

    /// Forward an availability query to the inventory service
    #[instrument(skip(self))]
    pub async fn check_inventory(&self, item_id: &ItemId) -> Result<Availability, ApplicationError> {
        self.inventory.check_availability(item_id).await
    }

    /// Forward an order listing to the order service
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApplicationError> {
        self.orders.list_orders().await
    }

    /// Forward an order lookup to the order service
    #[instrument(skip(self, raw_id), fields(order_id = %sanitize_for_log(raw_id)))]
    pub async fn get_order(&self, raw_id: &str) -> Result<Option<Order>, ApplicationError> {
        if !is_acceptable_identifier(raw_id) {
            return Err(DomainError::InvalidOrderId.into());
        }
        self.orders.get_order(raw_id).await
    }

    /// Log an incoming alert notification and return how many alerts it held
    pub fn receive_alerts(&self, notification: &AlertNotification) -> usize {
        let count = notification.alerts.len();
        info!(
            status = %sanitize_for_log(notification.status.as_deref()),
            alert_count = count,
            "Received alert webhook"
        );
        count
    }
}
