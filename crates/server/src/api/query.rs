//! Root query endpoint.
//!
//! `GET /?type=subcategories|videos` is the original read surface: direct
//! datastore reads with no cache in front.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use vidrail_core::store::MAX_VIDEO_ROWS;

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct RootParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// GET /
pub async fn query_root(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RootParams>,
) -> Result<Json<Value>, ApiError> {
    match params.kind.as_deref() {
        Some("subcategories") => {
            let category = params
                .category
                .ok_or_else(|| ApiError::bad_request("Missing required parameter: category"))?;

            let names = state.store().subcategory_names(&category)?;
            Ok(Json(json!(names)))
        }
        Some("videos") => {
            let category = params
                .category
                .ok_or_else(|| ApiError::bad_request("Missing required parameter: category"))?;
            let subcategory = params
                .subcategory
                .ok_or_else(|| ApiError::bad_request("Missing required parameter: subcategory"))?;

            let videos = state
                .store()
                .videos(&category, &subcategory, MAX_VIDEO_ROWS)?;
            Ok(Json(json!(videos)))
        }
        Some(other) => Err(ApiError::bad_request(format!(
            "Unknown type parameter '{other}'; expected 'subcategories' or 'videos'"
        ))),
        None => Err(ApiError::bad_request(
            "Missing required parameter: type ('subcategories' or 'videos')",
        )),
    }
}
