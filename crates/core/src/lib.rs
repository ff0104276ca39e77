pub mod cache;
pub mod config;
pub mod gateway;
pub mod ingest;
pub mod metrics;
pub mod seed;
pub mod store;
pub mod strategy;
pub mod testing;

pub use cache::{CacheEntryInfo, CacheStats, TtlCache};
pub use config::{
    load_config, load_config_from_str, validate_config, CacheConfig, Config, ConfigError,
    DatabaseConfig, IngestConfig, SanitizedConfig, ServerConfig, YouTubeConfig,
};
pub use gateway::{
    DurationFilter, GatewayError, SearchOrder, VideoQuery, VideoSearch, YouTubeGateway,
};
pub use ingest::{IngestError, IngestReport, IngestRunner};
pub use seed::{CategorySeed, ChannelSeed, SubcategorySeed};
pub use store::{
    Channel, SqliteStore, StoreError, SubcategoryPlan, VideoRecord, VideoStore, MAX_VIDEO_ROWS,
};
pub use strategy::{Strategy, StrategyEngine};
