//! Application state shared across handlers
//!
//! Each role gets its own state type. The parts every role serves
//! (health and metrics) live in [`ServiceInfo`], which handlers extract
//! through `FromRef`.

use std::sync::Arc;

use application::{ChaosController, GatewayService, InventoryService, OrderService};
use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;

/// Identity and metrics handle of the running service
#[derive(Clone)]
pub struct ServiceInfo {
    /// Name reported by `/api/health`
    pub name: &'static str,
    /// Renders `/metrics`; absent when no recorder could be installed
    pub prometheus: Option<PrometheusHandle>,
}

impl std::fmt::Debug for ServiceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceInfo")
            .field("name", &self.name)
            .field("prometheus", &self.prometheus.is_some())
            .finish()
    }
}

impl ServiceInfo {
    /// Service info without a metrics recorder
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            prometheus: None,
        }
    }

    /// Attach the Prometheus handle
    #[must_use]
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// State of the inventory service
#[derive(Debug, Clone)]
pub struct InventoryState {
    pub info: ServiceInfo,
    pub inventory: Arc<InventoryService>,
}

impl InventoryState {
    /// Chaos controller consulted by the inventory lookups
    pub fn chaos(&self) -> &Arc<ChaosController> {
        self.inventory.chaos()
    }
}

/// State of the order service
#[derive(Debug, Clone)]
pub struct OrderState {
    pub info: ServiceInfo,
    pub orders: Arc<OrderService>,
}

/// State of the gateway
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub info: ServiceInfo,
    pub gateway: Arc<GatewayService>,
}

impl FromRef<InventoryState> for ServiceInfo {
    fn from_ref(state: &InventoryState) -> Self {
        state.info.clone()
    }
}

impl FromRef<OrderState> for ServiceInfo {
    fn from_ref(state: &OrderState) -> Self {
        state.info.clone()
    }
}

impl FromRef<GatewayState> for ServiceInfo {
    fn from_ref(state: &GatewayState) -> Self {
        state.info.clone()
    }
}
