//! Common test utilities for in-process API testing.
//!
//! Builds the full router over an in-memory store and a mock search
//! gateway, so endpoint tests run without a network or a real database
//! file.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vidrail_core::testing::MockVideoSearch;
use vidrail_core::{
    seed, CacheConfig, Config, DatabaseConfig, IngestConfig, IngestRunner, ServerConfig,
    SqliteStore, StrategyEngine, TtlCache, VideoStore, YouTubeConfig,
};
use vidrail_server::api::create_router;
use vidrail_server::state::AppState;

/// Re-export fixtures for test convenience.
pub use vidrail_core::testing::fixtures;

/// In-process server with a mock gateway and a seeded in-memory store.
pub struct TestFixture {
    pub router: Router,
    pub gateway: Arc<MockVideoSearch>,
    pub store: Arc<SqliteStore>,
    #[allow(dead_code)]
    pub temp_dir: TempDir,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_cache_ttl(3600).await
    }

    pub async fn with_cache_ttl(ttl_secs: u64) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = Config {
            youtube: YouTubeConfig {
                api_key: "test-key".to_string(),
                api_base: "https://www.googleapis.com/youtube/v3".to_string(),
                timeout_secs: 10,
            },
            server: ServerConfig {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: temp_dir.path().join("test.db"),
                seed_on_start: true,
            },
            cache: CacheConfig { ttl_secs },
            ingest: IngestConfig {
                enabled: false,
                interval_mins: 360,
                subcategory_pause_ms: 0,
                channel_pause_ms: 0,
            },
        };

        let store = Arc::new(SqliteStore::in_memory().expect("Failed to create store"));
        store
            .seed(seed::DEFAULT_CHANNELS, seed::DEFAULT_CATEGORIES)
            .expect("Failed to seed store");

        let gateway = Arc::new(MockVideoSearch::new());
        let engine = Arc::new(
            StrategyEngine::new(gateway.clone(), Duration::ZERO).with_rng_seed(42),
        );
        let cache = Arc::new(TtlCache::new(Duration::from_secs(ttl_secs)));
        let ingest = Arc::new(IngestRunner::new(
            store.clone(),
            engine.clone(),
            Duration::ZERO,
        ));

        let state = Arc::new(AppState::new(config, store.clone(), engine, cache, ingest));
        let router = create_router(state);

        Self {
            router,
            gateway,
            store,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request (no body needed for this API).
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };

        TestResponse { status, body }
    }
}
