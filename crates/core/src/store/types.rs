//! Types for the video metadata store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A curated YouTube channel (reference data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Display name, unique; used as the foreign key in seed configuration.
    pub name: String,
    /// External channel ID (e.g. `UC8butISFwT-Wl7EV0hUK0BQ`).
    pub channel_id: String,
    /// External handle (e.g. `@freecodecamp`).
    pub handle: String,
    /// Inactive channels are excluded when resolving curated lists.
    pub is_active: bool,
}

/// An active subcategory with its curated channels resolved, ready for the
/// strategy engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryPlan {
    pub category: String,
    pub name: String,
    /// Strategy name as stored; parsed at dispatch time so an unrecognized
    /// value degrades to an empty result instead of failing the row load.
    pub strategy: String,
    pub search_query: String,
    /// Optional ranking-mode override (e.g. `rating` instead of `viewCount`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_param: Option<String>,
    /// Optional duration filter: `short`, `medium` or `long`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<String>,
    pub max_results: u32,
    /// Curated channels in configuration order; empty for global strategies.
    pub channels: Vec<Channel>,
}

/// A normalized video, the unit product of a fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    /// External video ID; upsert conflict key.
    pub video_id: String,
    pub category: String,
    pub subcategory: String,
    pub title: String,
    /// Truncated at normalization time (500 chars + ellipsis marker).
    pub description: String,
    pub channel_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: String,
    pub watch_url: String,
    /// From the statistics part of the detail lookup; powers "Most Watched".
    #[serde(default)]
    pub view_count: u64,
}

/// Row counts written by a seeding pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub channels: u32,
    pub subcategories: u32,
    pub links: u32,
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_record_serialization() {
        let record = VideoRecord {
            video_id: "dQw4w9WgXcQ".to_string(),
            category: "dsa".to_string(),
            subcategory: "Most Watched".to_string(),
            title: "Graph algorithms".to_string(),
            description: "A walkthrough".to_string(),
            channel_title: "freeCodeCamp.org".to_string(),
            published_at: Some(Utc::now()),
            thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
            watch_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            view_count: 12345,
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: VideoRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.video_id, "dQw4w9WgXcQ");
        assert_eq!(parsed.view_count, 12345);
    }

    #[test]
    fn test_video_record_optional_fields_default() {
        let json = r#"{
            "video_id": "abc",
            "category": "dsa",
            "subcategory": "Latest Uploads",
            "title": "t",
            "description": "",
            "channel_title": "c",
            "thumbnail_url": "",
            "watch_url": ""
        }"#;
        let parsed: VideoRecord = serde_json::from_str(json).unwrap();
        assert!(parsed.published_at.is_none());
        assert_eq!(parsed.view_count, 0);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("dsa/Nope".to_string());
        assert_eq!(err.to_string(), "Not found: dsa/Nope");
    }
}
