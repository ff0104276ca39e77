use std::sync::Arc;

use vidrail_core::{
    Config, IngestRunner, SanitizedConfig, StrategyEngine, TtlCache, VideoStore,
};

/// Shared application state.
pub struct AppState {
    config: Config,
    store: Arc<dyn VideoStore>,
    engine: Arc<StrategyEngine>,
    cache: Arc<TtlCache>,
    ingest: Arc<IngestRunner>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn VideoStore>,
        engine: Arc<StrategyEngine>,
        cache: Arc<TtlCache>,
        ingest: Arc<IngestRunner>,
    ) -> Self {
        Self {
            config,
            store,
            engine,
            cache,
            ingest,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn store(&self) -> &dyn VideoStore {
        self.store.as_ref()
    }

    pub fn engine(&self) -> &StrategyEngine {
        self.engine.as_ref()
    }

    pub fn cache(&self) -> &TtlCache {
        self.cache.as_ref()
    }

    pub fn ingest(&self) -> &IngestRunner {
        self.ingest.as_ref()
    }
}
