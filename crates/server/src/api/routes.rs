use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{handlers, ingest, query, videos};
use crate::metrics;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Original read surface
        .route("/", get(query::query_root))
        .route("/health", get(handlers::health))
        // Cached aggregation surface
        .route("/api/videos", get(videos::get_videos))
        .route("/api/health", get(videos::cache_health))
        .route("/api/cache/clear", get(videos::clear_cache))
        // Operations
        .route("/api/ingest/run", post(ingest::run_ingest))
        .route("/api/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        // The read surface is consumed directly by browser frontends.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, response.status().as_str()])
        .inc();
    response
}
