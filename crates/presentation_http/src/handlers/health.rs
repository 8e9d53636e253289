//! Health check handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::ServiceInfo;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check(State(info): State<ServiceInfo>) -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "UP".to_string(),
        service: info.name.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_service_name() {
        let Json(resp) = health_check(State(ServiceInfo::new("order-service"))).await;
        assert_eq!(resp.status, "UP");
        assert_eq!(resp.service, "order-service");
        assert!(!resp.version.is_empty());
    }
}
