//! Strategy-driven video fetching.
//!
//! Each subcategory carries a strategy name that selects how its videos are
//! fetched from the search gateway: global popularity or recency searches,
//! per-channel curated searches with fallback, or format-filtered searches.

mod engine;

pub use engine::StrategyEngine;

/// Fetch strategy for a subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Single global search ranked by view count (or an explicit override),
    /// retried once at relevance ranking when empty.
    Popularity,
    /// Single global search ranked by upload date.
    Recency,
    /// Per curated channel: date-ordered search scoped to the subcategory
    /// query, falling back to the channel's plain uploads when empty.
    RecencyCurated,
    /// Per curated channel: relevance-ordered topic search, falling back to
    /// a smaller slice of plain uploads when empty.
    TopicCurated,
    /// Two global searches filtered to short and medium durations.
    FormatDuration,
    /// Single global search whose query already carries format keywords.
    FormatKeyword,
}

impl Strategy {
    /// Parse the stored strategy name. Unknown names are `None`; callers
    /// skip the subcategory rather than failing the whole pass.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "POPULARITY" => Some(Strategy::Popularity),
            "RECENCY" => Some(Strategy::Recency),
            "RECENCY_CURATED" => Some(Strategy::RecencyCurated),
            "TOPIC_CURATED" => Some(Strategy::TopicCurated),
            "FORMAT_DURATION" => Some(Strategy::FormatDuration),
            "FORMAT_KEYWORD" => Some(Strategy::FormatKeyword),
            _ => None,
        }
    }

    /// True for strategies that require a curated channel list.
    pub fn is_curated(&self) -> bool {
        matches!(self, Strategy::RecencyCurated | Strategy::TopicCurated)
    }
}
