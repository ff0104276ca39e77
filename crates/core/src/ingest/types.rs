use serde::Serialize;

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Subcategories the pass got to before finishing or being cancelled.
    pub processed: u32,
    /// Video rows written (inserted or updated).
    pub videos_saved: u32,
    /// Subcategories whose writes failed. Fetch failures are not counted
    /// here; they surface as zero results.
    pub failed: u32,
}
