//! End-to-end tests for the HTTP API over mock dependencies.

mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{fixtures, TestFixture};
use vidrail_core::{VideoRecord, VideoStore};

fn stored_video(id: &str, subcategory: &str, view_count: u64, day: u32) -> VideoRecord {
    VideoRecord {
        video_id: id.to_string(),
        category: "dsa".to_string(),
        subcategory: subcategory.to_string(),
        title: format!("Video {id}"),
        description: "desc".to_string(),
        channel_title: "NeetCode".to_string(),
        published_at: Some(Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap()),
        thumbnail_url: String::new(),
        watch_url: format!("https://www.youtube.com/watch?v={id}"),
        view_count,
    }
}

// --- Root query surface ------------------------------------------------------

#[tokio::test]
async fn test_root_requires_type_parameter() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"].as_str().unwrap().contains("type"));
}

#[tokio::test]
async fn test_root_rejects_unknown_type() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/?type=channels").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"]
        .as_str()
        .unwrap()
        .contains("channels"));
}

#[tokio::test]
async fn test_list_subcategories() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/?type=subcategories&category=dsa").await;
    assert_eq!(response.status, StatusCode::OK);

    let names = response.body.as_array().unwrap();
    assert_eq!(names.len(), 11);
    assert_eq!(names[0], "Most Watched");
    assert_eq!(names[1], "Latest Uploads");
}

#[tokio::test]
async fn test_list_subcategories_requires_category() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/?type=subcategories").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"]
        .as_str()
        .unwrap()
        .contains("category"));
}

#[tokio::test]
async fn test_list_subcategories_unknown_category_is_empty() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/?type=subcategories&category=nope").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_videos_require_both_parameters() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/?type=videos&category=dsa").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"]
        .as_str()
        .unwrap()
        .contains("subcategory"));
}

#[tokio::test]
async fn test_videos_empty_bucket_is_ok() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .get("/?type=videos&category=dsa&subcategory=Most%20Watched")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_videos_capped_at_fifty_and_ordered_by_views() {
    let fixture = TestFixture::new().await;

    let videos: Vec<VideoRecord> = (0..60)
        .map(|i| stored_video(&format!("v{i}"), "Most Watched", i, 1 + (i % 28) as u32))
        .collect();
    fixture.store.upsert_videos(&videos).unwrap();

    let response = fixture
        .get("/?type=videos&category=dsa&subcategory=Most%20Watched")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let rows = response.body.as_array().unwrap();
    assert_eq!(rows.len(), 50);
    assert_eq!(rows[0]["video_id"], "v59");
    assert_eq!(rows[0]["view_count"], 59);
}

#[tokio::test]
async fn test_videos_ordered_by_recency_for_other_rails() {
    let fixture = TestFixture::new().await;

    fixture
        .store
        .upsert_videos(&[
            stored_video("old", "Latest Uploads", 9999, 1),
            stored_video("new", "Latest Uploads", 1, 20),
        ])
        .unwrap();

    let response = fixture
        .get("/?type=videos&category=dsa&subcategory=Latest%20Uploads")
        .await;
    let rows = response.body.as_array().unwrap();
    assert_eq!(rows[0]["video_id"], "new");
}

// --- Health -------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_database_state() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database_connected"], true);
    assert_eq!(response.body["search_backend"], "mock");
}

// --- Cached aggregation surface -------------------------------------------------

#[tokio::test]
async fn test_api_videos_requires_parameters() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/videos?category=dsa").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_videos_unknown_subcategory_is_404() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .get("/api/videos?category=dsa&subcategory=Nope")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["detail"].as_str().unwrap().contains("Nope"));
}

#[tokio::test]
async fn test_api_videos_fetches_then_serves_from_cache() {
    let fixture = TestFixture::new().await;

    let mut long_description = fixtures::video("a1");
    long_description.description = "x".repeat(400);
    fixture
        .gateway
        .enqueue_query_results(vec![long_description, fixtures::video("a2")])
        .await;

    let first = fixture
        .get("/api/videos?category=dsa&subcategory=Most%20Watched")
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["cached"], false);
    assert_eq!(first.body["count"], 2);
    assert_eq!(first.body["category"], "dsa");

    // Descriptions are re-truncated to 200 chars on this surface.
    let descriptions: Vec<&str> = first.body["videos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["description"].as_str().unwrap())
        .collect();
    assert!(descriptions
        .iter()
        .any(|d| d.chars().count() == 203 && d.ends_with("...")));

    let calls_after_first = fixture.gateway.recorded_searches().await.len();

    let second = fixture
        .get("/api/videos?category=dsa&subcategory=Most%20Watched")
        .await;
    assert_eq!(second.body["cached"], true);
    assert_eq!(second.body["count"], 2);
    assert_eq!(
        fixture.gateway.recorded_searches().await.len(),
        calls_after_first,
        "cache hit must not touch the gateway"
    );
}

#[tokio::test]
async fn test_api_cache_clear_forces_refetch() {
    let fixture = TestFixture::new().await;
    fixture
        .gateway
        .enqueue_query_results(vec![fixtures::video("a")])
        .await;

    fixture
        .get("/api/videos?category=dsa&subcategory=Most%20Watched")
        .await;

    let health = fixture.get("/api/health").await;
    assert_eq!(health.body["cache_entries"], 1);
    assert_eq!(health.body["entries"][0]["key"], "dsa_Most Watched");

    let clear = fixture.get("/api/cache/clear").await;
    assert_eq!(clear.body["entries_removed"], 1);

    let after = fixture
        .get("/api/videos?category=dsa&subcategory=Most%20Watched")
        .await;
    assert_eq!(after.body["cached"], false);
}

// --- Operations -----------------------------------------------------------------

#[tokio::test]
async fn test_ingest_run_returns_report() {
    let fixture = TestFixture::new().await;
    fixture
        .gateway
        .enqueue_query_results(fixtures::videos("p", 3))
        .await;

    let response = fixture.post("/api/ingest/run").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["processed"].as_u64().unwrap() > 0);
    assert_eq!(response.body["videos_saved"], 3);

    let stored = fixture.store.videos("dsa", "Most Watched", 50).unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn test_config_endpoint_redacts_api_key() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/config").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["youtube"]["api_key_configured"], true);
    assert!(!response.body.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_counters() {
    let fixture = TestFixture::new().await;

    fixture.get("/health").await;
    let response = fixture.get("/metrics").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .as_str()
        .unwrap()
        .contains("vidrail_http_requests_total"));
}
