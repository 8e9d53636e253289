//! HTTP presentation layer for the order fulfillment services
//!
//! One binary serves any of the three roles (gateway, inventory, order);
//! this crate holds their routers, handlers and middleware.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{RequestIdLayer, ValidatedJson};
pub use routes::{
    create_gateway_router, create_inventory_router, create_order_router, with_middleware,
};
pub use state::{GatewayState, InventoryState, OrderState, ServiceInfo};
