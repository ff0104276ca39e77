//! Testing utilities and mock implementations.
//!
//! Provides a mock search backend so strategy, ingestion and API tests run
//! without touching the real upstream service.

mod mock_gateway;

pub use mock_gateway::{MockFailure, MockVideoSearch, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::store::VideoRecord;

    /// Create a test video record with reasonable defaults.
    pub fn video(id: &str) -> VideoRecord {
        video_from_channel(id, "Mock Channel")
    }

    /// Create a test video record attributed to a specific channel.
    pub fn video_from_channel(id: &str, channel_title: &str) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            category: String::new(),
            subcategory: String::new(),
            title: format!("Video {id}"),
            description: "A mock video".to_string(),
            channel_title: channel_title.to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
            thumbnail_url: format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
            watch_url: format!("https://www.youtube.com/watch?v={id}"),
            view_count: 1000,
        }
    }

    /// A batch of distinct test videos, `prefix0..prefixN`.
    pub fn videos(prefix: &str, count: usize) -> Vec<VideoRecord> {
        (0..count).map(|i| video(&format!("{prefix}{i}"))).collect()
    }
}
