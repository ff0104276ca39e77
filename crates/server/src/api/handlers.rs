//! Health, config and metrics handlers.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use vidrail_core::SanitizedConfig;

use crate::metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub database_connected: bool,
    pub search_backend: String,
}

/// GET /health
///
/// Always 200; the body carries the probe state.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let connected = state.store().ping();
    Json(HealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        message: "vidrail backend".to_string(),
        database_connected: connected,
        search_backend: state.engine().gateway_name().to_string(),
    })
}

/// GET /api/config
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /metrics
pub async fn get_metrics() -> String {
    metrics::encode_metrics()
}
