//! Batch ingestion.
//!
//! Walks every active subcategory, runs its fetch strategy and upserts the
//! results. Designed to be re-runnable: the upsert key is the external
//! video ID, so repeated passes update rows instead of duplicating them.

mod runner;
mod types;

pub use runner::IngestRunner;
pub use types::IngestReport;

use thiserror::Error;

use crate::store::StoreError;

/// Errors from the ingestion runner.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("An ingestion pass is already running")]
    AlreadyRunning,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
