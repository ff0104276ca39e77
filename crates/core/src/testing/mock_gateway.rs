//! Mock search backend for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::gateway::{GatewayError, VideoQuery, VideoSearch};
use crate::store::VideoRecord;

/// A recorded gateway call for test assertions.
#[derive(Debug, Clone)]
pub enum RecordedSearch {
    Query {
        query: String,
        order: &'static str,
        duration: Option<&'static str>,
        max_results: u32,
    },
    Channel {
        channel_id: String,
        query: Option<String>,
        order: &'static str,
        max_results: u32,
    },
}

/// Persistent failure mode for the mock.
#[derive(Debug, Clone, Copy)]
pub enum MockFailure {
    Quota,
    Api,
}

impl MockFailure {
    fn to_error(self) -> GatewayError {
        match self {
            MockFailure::Quota => GatewayError::QuotaExceeded,
            MockFailure::Api => GatewayError::ApiError("mock failure".to_string()),
        }
    }
}

/// Mock implementation of the [`VideoSearch`] trait.
///
/// Global query results are a FIFO queue (one batch per call, empty batch
/// once drained). Channel results are keyed by channel ID, with separate
/// tables for query-scoped calls and plain-uploads calls so fallback paths
/// are testable.
pub struct MockVideoSearch {
    query_results: Arc<RwLock<VecDeque<Vec<VideoRecord>>>>,
    channel_results: Arc<RwLock<HashMap<String, Vec<VideoRecord>>>>,
    channel_uploads: Arc<RwLock<HashMap<String, Vec<VideoRecord>>>>,
    failure: Arc<RwLock<Option<MockFailure>>>,
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
}

impl MockVideoSearch {
    pub fn new() -> Self {
        Self {
            query_results: Arc::new(RwLock::new(VecDeque::new())),
            channel_results: Arc::new(RwLock::new(HashMap::new())),
            channel_uploads: Arc::new(RwLock::new(HashMap::new())),
            failure: Arc::new(RwLock::new(None)),
            searches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Enqueue one batch of results for the next global query call.
    pub async fn enqueue_query_results(&self, results: Vec<VideoRecord>) {
        self.query_results.write().await.push_back(results);
    }

    /// Results for query-scoped calls against a channel.
    pub async fn set_channel_results(&self, channel_id: &str, results: Vec<VideoRecord>) {
        self.channel_results
            .write()
            .await
            .insert(channel_id.to_string(), results);
    }

    /// Results for plain-uploads calls (no query) against a channel.
    pub async fn set_channel_uploads(&self, channel_id: &str, results: Vec<VideoRecord>) {
        self.channel_uploads
            .write()
            .await
            .insert(channel_id.to_string(), results);
    }

    /// Make every subsequent call fail.
    pub async fn fail_with(&self, failure: MockFailure) {
        *self.failure.write().await = Some(failure);
    }

    /// All calls made so far.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    async fn check_failure(&self) -> Result<(), GatewayError> {
        if let Some(failure) = *self.failure.read().await {
            return Err(failure.to_error());
        }
        Ok(())
    }
}

impl Default for MockVideoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoSearch for MockVideoSearch {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_by_query(&self, params: &VideoQuery) -> Result<Vec<VideoRecord>, GatewayError> {
        self.searches.write().await.push(RecordedSearch::Query {
            query: params.query.clone(),
            order: params.order.as_param(),
            duration: params.duration.map(|d| d.as_param()),
            max_results: params.max_results,
        });

        self.check_failure().await?;

        Ok(self
            .query_results
            .write()
            .await
            .pop_front()
            .unwrap_or_default())
    }

    async fn search_by_channel(
        &self,
        channel_id: &str,
        query: Option<&str>,
        params: &VideoQuery,
    ) -> Result<Vec<VideoRecord>, GatewayError> {
        self.searches.write().await.push(RecordedSearch::Channel {
            channel_id: channel_id.to_string(),
            query: query.map(|q| q.to_string()),
            order: params.order.as_param(),
            max_results: params.max_results,
        });

        self.check_failure().await?;

        let table = match query {
            Some(_) => self.channel_results.read().await,
            None => self.channel_uploads.read().await,
        };
        let mut results = table.get(channel_id).cloned().unwrap_or_default();
        results.truncate(params.max_results as usize);
        Ok(results)
    }
}
