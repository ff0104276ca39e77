//! YouTube Data API v3 search backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::YouTubeConfig;
use crate::metrics;
use crate::store::VideoRecord;

use super::{truncate_with_ellipsis, GatewayError, VideoQuery, VideoSearch};

/// Max normalized description length, ingestion path.
const DESCRIPTION_MAX_CHARS: usize = 500;

/// The videos endpoint accepts at most 50 IDs per call.
const DETAILS_BATCH_SIZE: usize = 50;

/// Pause between detail batches to stay friendly with upstream throttling.
const DETAILS_BATCH_PAUSE: Duration = Duration::from_millis(200);

/// YouTube Data API search backend.
pub struct YouTubeGateway {
    client: Client,
    api_base: String,
    api_key: String,
}

impl YouTubeGateway {
    /// Create a new gateway from configuration.
    pub fn new(config: &YouTubeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Build the search.list URL. Returns IDs only; full metadata comes from
    /// the follow-up videos.list call.
    fn build_search_url(&self, query: Option<&str>, channel_id: Option<&str>, params: &VideoQuery) -> String {
        let mut url = format!(
            "{}/search?part=id&type=video&relevanceLanguage=en&maxResults={}&order={}&key={}",
            self.api_base,
            params.max_results,
            params.order.as_param(),
            urlencoding::encode(&self.api_key)
        );

        if let Some(q) = query {
            if !q.is_empty() {
                url.push_str(&format!("&q={}", urlencoding::encode(q)));
            }
        }
        if let Some(channel) = channel_id {
            url.push_str(&format!("&channelId={}", urlencoding::encode(channel)));
        }
        if let Some(duration) = params.duration {
            url.push_str(&format!("&videoDuration={}", duration.as_param()));
        }

        url
    }

    fn build_details_url(&self, video_ids: &[String]) -> String {
        format!(
            "{}/videos?part=snippet,statistics&id={}&key={}",
            self.api_base,
            video_ids.join(","),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::ConnectionFailed(e.to_string())
            } else {
                GatewayError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // Quota exhaustion arrives as 403 with a "quotaExceeded" reason.
            if status == StatusCode::FORBIDDEN && body.to_lowercase().contains("quota") {
                return Err(GatewayError::QuotaExceeded);
            }
            return Err(GatewayError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::ApiError(format!("Failed to parse response: {}", e)))
    }

    /// Phase one: search for matching video IDs.
    async fn search_ids(
        &self,
        query: Option<&str>,
        channel_id: Option<&str>,
        params: &VideoQuery,
    ) -> Result<Vec<String>, GatewayError> {
        let url = self.build_search_url(query, channel_id, params);
        debug!(
            query = query.unwrap_or(""),
            channel = channel_id.unwrap_or(""),
            order = params.order.as_param(),
            "Searching YouTube"
        );

        let response: SearchResponse = self.get_json(&url).await?;
        let ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        debug!(found = ids.len(), "YouTube search complete");
        Ok(ids)
    }

    /// Phase two: fetch full metadata for the IDs, in batches of 50 with a
    /// short pause between batches.
    async fn fetch_details(&self, video_ids: &[String]) -> Result<Vec<VideoRecord>, GatewayError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity(video_ids.len());
        let mut batches = video_ids.chunks(DETAILS_BATCH_SIZE).peekable();

        while let Some(batch) = batches.next() {
            let url = self.build_details_url(batch);
            let response: DetailsResponse = self.get_json(&url).await?;

            for item in response.items {
                records.push(normalize_video(item));
            }

            if batches.peek().is_some() {
                tokio::time::sleep(DETAILS_BATCH_PAUSE).await;
            }
        }

        Ok(records)
    }

    async fn run_search(
        &self,
        query: Option<&str>,
        channel_id: Option<&str>,
        params: &VideoQuery,
    ) -> Result<Vec<VideoRecord>, GatewayError> {
        let result = async {
            let ids = self.search_ids(query, channel_id, params).await?;
            self.fetch_details(&ids).await
        }
        .await;

        match &result {
            Ok(records) => {
                metrics::GATEWAY_SEARCHES.with_label_values(&["ok"]).inc();
                metrics::GATEWAY_RESULTS.observe(records.len() as f64);
            }
            Err(GatewayError::QuotaExceeded) => {
                metrics::GATEWAY_SEARCHES.with_label_values(&["quota"]).inc();
            }
            Err(e) => {
                metrics::GATEWAY_SEARCHES.with_label_values(&["error"]).inc();
                warn!(error = %e, "YouTube search failed");
            }
        }

        result
    }
}

#[async_trait]
impl VideoSearch for YouTubeGateway {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn search_by_query(&self, params: &VideoQuery) -> Result<Vec<VideoRecord>, GatewayError> {
        self.run_search(Some(&params.query), None, params).await
    }

    async fn search_by_channel(
        &self,
        channel_id: &str,
        query: Option<&str>,
        params: &VideoQuery,
    ) -> Result<Vec<VideoRecord>, GatewayError> {
        self.run_search(query, Some(channel_id), params).await
    }
}

/// Normalize one videos.list item into a [`VideoRecord`]. Category and
/// subcategory are stamped later by the strategy engine.
fn normalize_video(item: DetailsItem) -> VideoRecord {
    let snippet = item.snippet.unwrap_or_default();
    let view_count = item
        .statistics
        .and_then(|s| s.view_count)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    VideoRecord {
        watch_url: format!("https://www.youtube.com/watch?v={}", item.id),
        video_id: item.id,
        category: String::new(),
        subcategory: String::new(),
        title: if snippet.title.is_empty() {
            "Untitled".to_string()
        } else {
            snippet.title
        },
        description: truncate_with_ellipsis(&snippet.description, DESCRIPTION_MAX_CHARS),
        channel_title: if snippet.channel_title.is_empty() {
            "Unknown Channel".to_string()
        } else {
            snippet.channel_title
        },
        published_at: snippet
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
        thumbnail_url: pick_thumbnail(snippet.thumbnails),
        view_count,
    }
}

/// Prefer the highest-resolution thumbnail variant offered.
fn pick_thumbnail(thumbnails: Option<Thumbnails>) -> String {
    let Some(t) = thumbnails else {
        return String::new();
    };
    [t.maxres, t.high, t.medium, t.default]
        .into_iter()
        .flatten()
        .map(|v| v.url)
        .next()
        .unwrap_or_default()
}

// --- Wire types -------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    items: Vec<DetailsItem>,
}

#[derive(Debug, Deserialize)]
struct DetailsItem {
    id: String,
    snippet: Option<Snippet>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    maxres: Option<ThumbnailVariant>,
    high: Option<ThumbnailVariant>,
    medium: Option<ThumbnailVariant>,
    default: Option<ThumbnailVariant>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailVariant {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}
