//! Order creation and lookup

use std::sync::Arc;

use domain::{DomainError, NewOrder, Order, OrderId, is_acceptable_identifier};
use tracing::{error, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{MetricsPort, OrderStore, TracerPort},
    sanitize::sanitize_for_log,
    span_scope::ScopedSpan,
};

/// Counter incremented once per persisted order
pub const ORDERS_CREATED_COUNTER: &str = "orders_created_total";

/// Validates and persists orders
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    metrics: Arc<dyn MetricsPort>,
    tracer: Arc<dyn TracerPort>,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService").finish_non_exhaustive()
    }
}

impl OrderService {
    /// Create a new order service
    pub fn new(
        store: Arc<dyn OrderStore>,
        metrics: Arc<dyn MetricsPort>,
        tracer: Arc<dyn TracerPort>,
    ) -> Self {
        Self {
            store,
            metrics,
            tracer,
        }
    }

    /// Create a pending order
    ///
    /// Invalid input is rejected before anything is persisted or counted.
    #[instrument(skip(self, item_id), fields(item_id = %sanitize_for_log(item_id)))]
    pub async fn create_order(
        &self,
        item_id: Option<&str>,
        quantity: Option<i64>,
    ) -> Result<Order, ApplicationError> {
        let draft = NewOrder::from_request(item_id, quantity)?;

        let mut span = ScopedSpan::start(self.tracer.as_ref(), "create-order");
        span.set_attribute("order.item_id", draft.item_id.as_str());
        span.set_attribute("order.quantity", draft.quantity.value());

        let order = match self.store.save(draft).await {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, "Failed to persist order");
                span.record_error(&e.to_string());
                return Err(e);
            },
        };

        self.metrics.increment_counter(ORDERS_CREATED_COUNTER);
        info!(
            order_id = %order.id,
            quantity = order.quantity.value(),
            "Order created"
        );
        Ok(order)
    }

    /// All orders, oldest first
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApplicationError> {
        self.store.find_all().await
    }

    /// Look up an order by its raw path identifier
    ///
    /// Blank or overlong identifiers are invalid requests; anything that is
    /// not a known order id yields `None`.
    #[instrument(skip(self, raw_id), fields(order_id = %sanitize_for_log(raw_id)))]
    pub async fn get_order(&self, raw_id: &str) -> Result<Option<Order>, ApplicationError> {
        if !is_acceptable_identifier(raw_id) {
            return Err(DomainError::InvalidOrderId.into());
        }
        let Ok(id) = OrderId::parse(raw_id) else {
            return Ok(None);
        };
        self.store.find_by_id(&id).await
    }
}
