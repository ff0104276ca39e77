//! Video metadata store.
//!
//! Persists the configuration tables (channels, subcategories and their
//! junction rows) and the ingested video rows. The serving API and the
//! ingestion pass only coordinate through this store.

mod sqlite;
mod types;

pub use sqlite::SqliteStore;
pub use types::*;

use crate::seed::{CategorySeed, ChannelSeed};

/// Row cap applied by the read API when listing videos.
pub const MAX_VIDEO_ROWS: u32 = 50;

/// Trait for video metadata storage.
pub trait VideoStore: Send + Sync {
    /// Upsert the static channel/subcategory configuration.
    ///
    /// Idempotent: channels conflict on `channel_id`, subcategories on
    /// `(category, name)`, and the junction table is rebuilt from scratch.
    fn seed(
        &self,
        channels: &[ChannelSeed],
        categories: &[CategorySeed],
    ) -> Result<SeedReport, StoreError>;

    /// All active subcategories with their active curated channels resolved,
    /// in listing order.
    fn active_subcategories(&self) -> Result<Vec<SubcategoryPlan>, StoreError>;

    /// Look up one active subcategory by `(category, name)`.
    fn find_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<Option<SubcategoryPlan>, StoreError>;

    /// Names of the active subcategories of a category.
    fn subcategory_names(&self, category: &str) -> Result<Vec<String>, StoreError>;

    /// Ingested videos for a subcategory, ordered by view count descending
    /// for "Most Watched" rails and by published timestamp descending
    /// otherwise. `limit` caps the row count.
    fn videos(
        &self,
        category: &str,
        subcategory: &str,
        limit: u32,
    ) -> Result<Vec<VideoRecord>, StoreError>;

    /// Insert-or-update videos keyed on `video_id`. The incoming values win
    /// on conflict. Returns the number of rows written.
    fn upsert_videos(&self, videos: &[VideoRecord]) -> Result<u32, StoreError>;

    /// Connectivity probe for health endpoints.
    fn ping(&self) -> bool;
}
