//! Chaos configuration handlers for the inventory service

use application::ChaosStats;
use axum::{Json, extract::State};
use domain::ChaosConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::InventoryState};

/// Body of `POST /api/chaos/latency`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LatencyRequest {
    pub enabled: Option<bool>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Latency settings after an update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyResponse {
    pub enabled: bool,
    pub min: u64,
    pub max: u64,
}

impl From<ChaosConfig> for LatencyResponse {
    fn from(config: ChaosConfig) -> Self {
        Self {
            enabled: config.latency_enabled,
            min: config.latency_min_ms,
            max: config.latency_max_ms,
        }
    }
}

/// Body of `POST /api/chaos/errors`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ErrorsRequest {
    pub enabled: Option<bool>,
    pub rate: Option<f64>,
}

/// Error-injection settings after an update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorsResponse {
    pub enabled: bool,
    pub rate: f64,
}

impl From<ChaosConfig> for ErrorsResponse {
    fn from(config: ChaosConfig) -> Self {
        Self {
            enabled: config.error_enabled,
            rate: config.error_rate,
        }
    }
}

/// Live chaos settings and injection counters
#[derive(Debug, Clone, Serialize)]
pub struct ChaosStatusResponse {
    pub config: ChaosConfig,
    pub stats: ChaosStats,
}

/// `POST /api/chaos/latency`
pub async fn configure_latency(
    State(state): State<InventoryState>,
    ValidatedJson(req): ValidatedJson<LatencyRequest>,
) -> Result<Json<LatencyResponse>, ApiError> {
    let config = state
        .chaos()
        .configure_latency(req.enabled, req.min, req.max)?;
    Ok(Json(config.into()))
}

/// `POST /api/chaos/errors`
pub async fn configure_errors(
    State(state): State<InventoryState>,
    ValidatedJson(req): ValidatedJson<ErrorsRequest>,
) -> Result<Json<ErrorsResponse>, ApiError> {
    let config = state.chaos().configure_errors(req.enabled, req.rate)?;
    Ok(Json(config.into()))
}

/// `GET /api/chaos`
pub async fn chaos_status(State(state): State<InventoryState>) -> Json<ChaosStatusResponse> {
    let chaos = state.chaos();
    Json(ChaosStatusResponse {
        config: chaos.snapshot(),
        stats: chaos.stats(),
    })
}
