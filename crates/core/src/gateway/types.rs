//! Search gateway types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the search gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The upstream service rejected the call because the daily quota is
    /// spent. Operationally distinct from other failures.
    #[error("Upstream quota exceeded")]
    QuotaExceeded,

    #[error("Search request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search API error: {0}")]
    ApiError(String),
}

/// Upstream ranking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    Relevance,
    Date,
    ViewCount,
    Rating,
}

impl SearchOrder {
    /// The upstream API's query parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            SearchOrder::Relevance => "relevance",
            SearchOrder::Date => "date",
            SearchOrder::ViewCount => "viewCount",
            SearchOrder::Rating => "rating",
        }
    }

    /// Parse a stored override like `order_param`. Unknown values are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(SearchOrder::Relevance),
            "date" => Some(SearchOrder::Date),
            "viewCount" => Some(SearchOrder::ViewCount),
            "rating" => Some(SearchOrder::Rating),
            _ => None,
        }
    }
}

/// Upstream duration filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationFilter {
    Short,
    Medium,
    Long,
}

impl DurationFilter {
    pub fn as_param(&self) -> &'static str {
        match self {
            DurationFilter::Short => "short",
            DurationFilter::Medium => "medium",
            DurationFilter::Long => "long",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "short" => Some(DurationFilter::Short),
            "medium" => Some(DurationFilter::Medium),
            "long" => Some(DurationFilter::Long),
            _ => None,
        }
    }
}

/// Parameters for one gateway search.
#[derive(Debug, Clone)]
pub struct VideoQuery {
    pub query: String,
    pub order: SearchOrder,
    pub duration: Option<DurationFilter>,
    pub max_results: u32,
}

impl VideoQuery {
    pub fn new(query: impl Into<String>, order: SearchOrder, max_results: u32) -> Self {
        Self {
            query: query.into(),
            order,
            duration: None,
            max_results,
        }
    }

    pub fn with_duration(mut self, duration: DurationFilter) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Truncate to `max_chars` characters, appending an ellipsis when text was
/// dropped. Character-based so multi-byte titles never split mid-codepoint.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_order_round_trip() {
        for order in [
            SearchOrder::Relevance,
            SearchOrder::Date,
            SearchOrder::ViewCount,
            SearchOrder::Rating,
        ] {
            assert_eq!(SearchOrder::parse(order.as_param()), Some(order));
        }
        assert_eq!(SearchOrder::parse("title"), None);
    }

    #[test]
    fn test_duration_filter_parse() {
        assert_eq!(DurationFilter::parse("short"), Some(DurationFilter::Short));
        assert_eq!(DurationFilter::parse("any"), None);
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let text = "héllo wörld".repeat(50);
        let truncated = truncate_with_ellipsis(&text, 200);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }
}
