//! Cached video aggregation endpoints.
//!
//! `GET /api/videos` serves live strategy-engine fetches through the TTL
//! cache instead of reading ingested rows. Descriptions are re-truncated to
//! 200 characters for this surface.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use vidrail_core::gateway::truncate_with_ellipsis;
use vidrail_core::{CacheStats, TtlCache, VideoRecord};

use crate::state::AppState;

use super::ApiError;

/// Max description length on the aggregation surface.
const SERVING_DESCRIPTION_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct VideosParams {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VideosResponse {
    pub videos: Vec<VideoRecord>,
    pub category: String,
    pub subcategory: String,
    pub count: usize,
    pub cached: bool,
}

/// GET /api/videos
pub async fn get_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideosParams>,
) -> Result<Json<VideosResponse>, ApiError> {
    let category = params
        .category
        .ok_or_else(|| ApiError::bad_request("Missing required parameter: category"))?;
    let subcategory = params
        .subcategory
        .ok_or_else(|| ApiError::bad_request("Missing required parameter: subcategory"))?;

    let key = TtlCache::video_key(&category, &subcategory);
    if let Some(videos) = state.cache().get(&key) {
        debug!(key = %key, "Serving videos from cache");
        return Ok(Json(VideosResponse {
            count: videos.len(),
            videos,
            category,
            subcategory,
            cached: true,
        }));
    }

    let plan = state
        .store()
        .find_subcategory(&category, &subcategory)?
        .ok_or_else(|| {
            ApiError::not_found(format!("Unknown subcategory '{subcategory}' in '{category}'"))
        })?;

    let mut videos = state.engine().fetch(&plan).await;
    for video in &mut videos {
        video.description = truncate_with_ellipsis(&video.description, SERVING_DESCRIPTION_MAX_CHARS);
    }

    state.cache().put(&key, videos.clone());
    Ok(Json(VideosResponse {
        count: videos.len(),
        videos,
        category,
        subcategory,
        cached: false,
    }))
}

#[derive(Debug, Serialize)]
pub struct CacheHealthResponse {
    pub status: String,
    pub cache_entries: usize,
    pub ttl_secs: u64,
    pub entries: Vec<vidrail_core::CacheEntryInfo>,
}

/// GET /api/health
pub async fn cache_health(State(state): State<Arc<AppState>>) -> Json<CacheHealthResponse> {
    let CacheStats {
        entries,
        ttl_secs,
        keys,
    } = state.cache().stats();

    Json(CacheHealthResponse {
        status: "ok".to_string(),
        cache_entries: entries,
        ttl_secs,
        entries: keys,
    })
}

#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    pub status: String,
    pub entries_removed: usize,
}

/// GET /api/cache/clear
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<CacheClearResponse> {
    let removed = state.cache().invalidate_all();
    debug!(removed, "Cache cleared");
    Json(CacheClearResponse {
        status: "ok".to_string(),
        entries_removed: removed,
    })
}
