//! Strategy dispatch and post-processing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::gateway::{DurationFilter, GatewayError, SearchOrder, VideoQuery, VideoSearch};
use crate::store::{SubcategoryPlan, VideoRecord};

use super::Strategy;

/// Per-channel result cap for date-ordered curated fetches.
const RECENCY_CHANNEL_CAP: u32 = 4;

/// Per-channel result cap for topic-scoped curated fetches.
const TOPIC_CHANNEL_CAP: u32 = 3;

/// Smaller cap for the plain-uploads fallback of a topic fetch.
const TOPIC_FALLBACK_CAP: u32 = 2;

/// Executes a subcategory's fetch strategy against the search gateway.
///
/// Gateway failures are absorbed here: a failed call contributes an empty
/// list and the strategy's single-shot fallback rules are the only retry
/// logic. The engine never raises to its caller.
pub struct StrategyEngine {
    gateway: Arc<dyn VideoSearch>,
    channel_pause: Duration,
    rng: Mutex<StdRng>,
}

impl StrategyEngine {
    pub fn new(gateway: Arc<dyn VideoSearch>, channel_pause: Duration) -> Self {
        Self {
            gateway,
            channel_pause,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seed the shuffle source, for deterministic tests.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Name of the search backend behind this engine.
    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Fetch videos for one subcategory. Always returns (possibly empty);
    /// results are stamped with the plan's category and subcategory and
    /// capped at `max_results`.
    pub async fn fetch(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let Some(strategy) = Strategy::parse(&plan.strategy) else {
            warn!(
                category = %plan.category,
                subcategory = %plan.name,
                strategy = %plan.strategy,
                "Unknown strategy, skipping subcategory"
            );
            return Vec::new();
        };

        if strategy.is_curated() && plan.channels.is_empty() {
            warn!(
                category = %plan.category,
                subcategory = %plan.name,
                "Curated strategy without channels, skipping subcategory"
            );
            return Vec::new();
        }

        let mut videos = match strategy {
            Strategy::Popularity => self.fetch_popularity(plan).await,
            Strategy::Recency => self.fetch_recency(plan).await,
            Strategy::RecencyCurated => self.fetch_recency_curated(plan).await,
            Strategy::TopicCurated => self.fetch_topic_curated(plan).await,
            Strategy::FormatDuration => self.fetch_format_duration(plan).await,
            Strategy::FormatKeyword => self.fetch_format_keyword(plan).await,
        };

        videos = dedup_by_video_id(videos);
        videos.truncate(plan.max_results as usize);

        for video in &mut videos {
            video.category = plan.category.clone();
            video.subcategory = plan.name.clone();
        }

        debug!(
            category = %plan.category,
            subcategory = %plan.name,
            videos = videos.len(),
            "Strategy fetch complete"
        );
        videos
    }

    /// Global search ranked by view count (or `order_param` override), with
    /// a single relevance retry on an empty result.
    async fn fetch_popularity(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let order = plan
            .order_param
            .as_deref()
            .and_then(SearchOrder::parse)
            .unwrap_or(SearchOrder::ViewCount);

        let query = VideoQuery::new(plan.search_query.clone(), order, plan.max_results);
        let videos = self.absorb(self.gateway.search_by_query(&query).await);
        if !videos.is_empty() || order == SearchOrder::Relevance {
            return videos;
        }

        debug!(subcategory = %plan.name, "Empty popularity result, retrying at relevance");
        let retry = VideoQuery::new(
            plan.search_query.clone(),
            SearchOrder::Relevance,
            plan.max_results,
        );
        self.absorb(self.gateway.search_by_query(&retry).await)
    }

    async fn fetch_recency(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let query = VideoQuery::new(plan.search_query.clone(), SearchOrder::Date, plan.max_results);
        self.absorb(self.gateway.search_by_query(&query).await)
    }

    /// Date-ordered fetch per curated channel, falling back to the channel's
    /// plain uploads when the query-scoped call is empty.
    async fn fetch_recency_curated(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let params = VideoQuery::new("", SearchOrder::Date, RECENCY_CHANNEL_CAP);
        let query = (!plan.search_query.is_empty()).then_some(plan.search_query.as_str());

        let mut all = Vec::new();
        for (i, channel) in plan.channels.iter().enumerate() {
            if i > 0 {
                self.pause_between_channels().await;
            }

            let mut videos = match query {
                Some(q) => self.absorb(
                    self.gateway
                        .search_by_channel(&channel.channel_id, Some(q), &params)
                        .await,
                ),
                None => Vec::new(),
            };

            if videos.is_empty() {
                videos = self.absorb(
                    self.gateway
                        .search_by_channel(&channel.channel_id, None, &params)
                        .await,
                );
            }
            all.append(&mut videos);
        }

        self.shuffle(&mut all);
        all
    }

    /// Relevance-ordered topic fetch per curated channel; an empty channel
    /// falls back to a smaller slice of its plain uploads.
    async fn fetch_topic_curated(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let mut all = Vec::new();
        for (i, channel) in plan.channels.iter().enumerate() {
            if i > 0 {
                self.pause_between_channels().await;
            }

            let params = VideoQuery::new("", SearchOrder::Relevance, TOPIC_CHANNEL_CAP);
            let mut videos = self.absorb(
                self.gateway
                    .search_by_channel(&channel.channel_id, Some(&plan.search_query), &params)
                    .await,
            );

            if videos.is_empty() {
                let fallback = VideoQuery::new("", SearchOrder::Date, TOPIC_FALLBACK_CAP);
                videos = self.absorb(
                    self.gateway
                        .search_by_channel(&channel.channel_id, None, &fallback)
                        .await,
                );
            }
            all.append(&mut videos);
        }

        self.shuffle(&mut all);
        all
    }

    /// Two global fetches, short and medium duration, merged and shuffled.
    async fn fetch_format_duration(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let mut all = Vec::new();
        for duration in [DurationFilter::Short, DurationFilter::Medium] {
            let query =
                VideoQuery::new(plan.search_query.clone(), SearchOrder::Relevance, plan.max_results)
                    .with_duration(duration);
            all.append(&mut self.absorb(self.gateway.search_by_query(&query).await));
        }

        self.shuffle(&mut all);
        all
    }

    async fn fetch_format_keyword(&self, plan: &SubcategoryPlan) -> Vec<VideoRecord> {
        let mut query = VideoQuery::new(
            plan.search_query.clone(),
            SearchOrder::Relevance,
            plan.max_results,
        );
        if let Some(duration) = plan.video_duration.as_deref().and_then(DurationFilter::parse) {
            query = query.with_duration(duration);
        }
        self.absorb(self.gateway.search_by_query(&query).await)
    }

    /// Gateway failures become empty lists. Quota exhaustion is logged
    /// distinctly so operators can tell it apart from transient errors.
    fn absorb(&self, result: Result<Vec<VideoRecord>, GatewayError>) -> Vec<VideoRecord> {
        match result {
            Ok(videos) => videos,
            Err(GatewayError::QuotaExceeded) => {
                info!("Upstream quota exceeded, treating as empty result");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Gateway call failed, treating as empty result");
                Vec::new()
            }
        }
    }

    /// Randomize multi-source results so one channel never dominates the
    /// front of the list.
    fn shuffle(&self, videos: &mut [VideoRecord]) {
        let mut rng = self.rng.lock().unwrap();
        videos.shuffle(&mut *rng);
    }

    async fn pause_between_channels(&self) {
        if !self.channel_pause.is_zero() {
            tokio::time::sleep(self.channel_pause).await;
        }
    }
}

/// Keep the first occurrence of each video ID.
fn dedup_by_video_id(videos: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut seen = HashSet::new();
    videos
        .into_iter()
        .filter(|v| seen.insert(v.video_id.clone()))
        .collect()
}
