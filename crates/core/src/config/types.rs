use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// YouTube Data API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    /// API key for the YouTube Data API v3
    pub api_key: String,
    /// Base URL of the Data API (override for testing)
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_api_base() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_timeout() -> u32 {
    10
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Seed channel/subcategory configuration tables at startup.
    /// Seeding is idempotent, so leaving this on is safe.
    #[serde(default = "default_true")]
    pub seed_on_start: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_on_start: true,
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("vidrail.db")
}

fn default_true() -> bool {
    true
}

/// Serving-path cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// How long a cached subcategory result stays valid (default: 4 hours)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    4 * 60 * 60
}

/// Ingestion pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Run ingestion passes on a schedule. When disabled, passes can still
    /// be triggered via the API.
    #[serde(default)]
    pub enabled: bool,

    /// Minutes between scheduled ingestion passes.
    #[serde(default = "default_interval_mins")]
    pub interval_mins: u64,

    /// Pause between subcategories within a pass (milliseconds).
    /// This is the outbound rate limiter; keep it >= 500ms.
    #[serde(default = "default_subcategory_pause")]
    pub subcategory_pause_ms: u64,

    /// Pause between channel-scoped searches within a subcategory (milliseconds).
    #[serde(default = "default_channel_pause")]
    pub channel_pause_ms: u64,
}

fn default_interval_mins() -> u64 {
    360
}

fn default_subcategory_pause() -> u64 {
    1000
}

fn default_channel_pause() -> u64 {
    100
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_mins: default_interval_mins(),
            subcategory_pause_ms: default_subcategory_pause(),
            channel_pause_ms: default_channel_pause(),
        }
    }
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub youtube: SanitizedYouTubeConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub ingest: IngestConfig,
}

/// Sanitized YouTube config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedYouTubeConfig {
    pub api_key_configured: bool,
    pub api_base: String,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            youtube: SanitizedYouTubeConfig {
                api_key_configured: !config.youtube.api_key.is_empty(),
                api_base: config.youtube.api_base.clone(),
                timeout_secs: config.youtube.timeout_secs,
            },
            server: config.server.clone(),
            database: config.database.clone(),
            cache: config.cache.clone(),
            ingest: config.ingest.clone(),
        }
    }
}
