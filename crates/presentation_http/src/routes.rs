//! Route definitions for the three services

use axum::{
    Router,
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    handlers,
    middleware::RequestIdLayer,
    state::{GatewayState, InventoryState, OrderState},
};

/// Inventory service: availability lookups plus chaos controls
pub fn create_inventory_router(state: InventoryState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::get_inventory_metrics))
        .route(
            "/api/inventory/{item_id}",
            get(handlers::inventory::check_inventory),
        )
        .route("/api/chaos", get(handlers::chaos::chaos_status))
        .route("/api/chaos/latency", post(handlers::chaos::configure_latency))
        .route("/api/chaos/errors", post(handlers::chaos::configure_errors))
        .with_state(state)
}

/// Order service: order persistence
pub fn create_order_router(state: OrderState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::get_metrics))
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .with_state(state)
}

/// Gateway: client-facing order flow and pass-through queries
pub fn create_gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::get_metrics))
        .route(
            "/api/orders",
            get(handlers::gateway::list_orders).post(handlers::gateway::create_order),
        )
        .route("/api/orders/{id}", get(handlers::gateway::get_order))
        .route(
            "/api/inventory/{item_id}",
            get(handlers::gateway::check_inventory),
        )
        .route(
            "/api/alerts/webhook",
            post(handlers::gateway::receive_alert_webhook),
        )
        .with_state(state)
}

/// Wrap a service router with body limits, request tracing and correlation
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(config.max_body_size_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}
