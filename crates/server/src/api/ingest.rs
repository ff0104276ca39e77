//! Ingestion trigger endpoint.

use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::error;
use vidrail_core::{IngestError, IngestReport};

use crate::state::AppState;

use super::ApiError;

/// POST /api/ingest/run
///
/// Runs one full ingestion pass and returns its report. 409 when a pass is
/// already in flight.
pub async fn run_ingest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IngestReport>, ApiError> {
    match state.ingest().run_pass().await {
        Ok(report) => Ok(Json(report)),
        Err(IngestError::AlreadyRunning) => Err(ApiError::conflict(
            "An ingestion pass is already running",
        )),
        Err(e) => {
            error!(error = %e, "Ingestion pass failed");
            Err(ApiError::internal("Ingestion pass failed"))
        }
    }
}
