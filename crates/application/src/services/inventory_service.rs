//! Inventory lookup with fault injection

use std::{sync::Arc, time::Duration};

use domain::{Availability, InventoryItem, ItemId};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::{
    chaos::ChaosController,
    error::ApplicationError,
    ports::{InventoryStore, TracerPort},
    sanitize::sanitize_for_log,
    span_scope::ScopedSpan,
};

/// Answers availability queries, consulting the chaos controller first
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    chaos: Arc<ChaosController>,
    tracer: Arc<dyn TracerPort>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl std::fmt::Debug for InventoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryService")
            .field("chaos", &self.chaos)
            .finish_non_exhaustive()
    }
}

impl InventoryService {
    /// Create a new inventory service
    pub fn new(
        store: Arc<dyn InventoryStore>,
        chaos: Arc<ChaosController>,
        tracer: Arc<dyn TracerPort>,
    ) -> Self {
        Self {
            store,
            chaos,
            tracer,
            shutdown: None,
        }
    }

    /// Abort injected delays once `shutdown` flips to `true`
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// The controller consulted on every lookup
    pub fn chaos(&self) -> &Arc<ChaosController> {
        &self.chaos
    }

    /// Check whether an item is in stock
    ///
    /// Unknown items are reported with the placeholder record.
    #[instrument(skip(self), fields(item_id = %sanitize_for_log(item_id.as_str())))]
    pub async fn check(&self, item_id: &ItemId) -> Result<Availability, ApplicationError> {
        let mut span = ScopedSpan::start(self.tracer.as_ref(), "check-inventory");
        span.set_attribute("inventory.item_id", item_id.as_str());

        let decision = self.chaos.decide();
        if decision.is_fault() {
            debug!(?decision, "Chaos fault drawn");
        }

        if let Some(delay_ms) = decision.delay_ms {
            span.set_attribute("chaos.latency_ms", delay_ms);
            warn!(delay_ms, "Injecting chaos latency");
            if let Err(e) = self.pause(Duration::from_millis(delay_ms)).await {
                span.record_error(&e.to_string());
                return Err(e);
            }
        }

        if decision.inject_error {
            span.set_attribute("chaos.error", true);
            span.record_error("Chaos error injected");
            warn!("Injecting chaos error");
            return Err(ApplicationError::ChaosInjected);
        }

        let item = match self.store.find_by_id(item_id).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                debug!("Item not stocked, reporting placeholder");
                InventoryItem::placeholder(item_id.clone())
            },
            Err(e) => {
                span.record_error(&e.to_string());
                return Err(e);
            },
        };

        let availability = item.availability();
        span.set_attribute("inventory.available", availability.available);
        Ok(availability)
    }

    async fn pause(&self, delay: Duration) -> Result<(), ApplicationError> {
        let Some(mut shutdown) = self.shutdown.clone() else {
            tokio::time::sleep(delay).await;
            return Ok(());
        };

        // A closed channel disables the shutdown branch and the sleep runs out.
        tokio::select! {
            () = tokio::time::sleep(delay) => Ok(()),
            Ok(_) = shutdown.wait_for(|stop| *stop) => Err(ApplicationError::Interrupted),
        }
    }
}
