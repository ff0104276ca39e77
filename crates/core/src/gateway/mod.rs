//! Search gateway abstraction.
//!
//! The gateway turns upstream search results into [`VideoRecord`]s. Callers
//! treat every failure as "no results"; the error variants exist so the
//! strategy engine can log quota exhaustion distinctly before absorbing it.

mod types;
mod youtube;

pub use types::*;
pub use youtube::YouTubeGateway;

use async_trait::async_trait;

use crate::store::VideoRecord;

/// Trait for external video search backends.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Global keyword search.
    async fn search_by_query(&self, query: &VideoQuery) -> Result<Vec<VideoRecord>, GatewayError>;

    /// Channel-scoped search. `query` narrows within the channel; `None`
    /// returns the channel's plain uploads in the requested order.
    async fn search_by_channel(
        &self,
        channel_id: &str,
        query: Option<&str>,
        params: &VideoQuery,
    ) -> Result<Vec<VideoRecord>, GatewayError>;
}
