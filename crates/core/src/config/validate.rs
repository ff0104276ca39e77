use super::{types::Config, ConfigError};

/// Validate configuration beyond what serde enforces.
///
/// A missing or empty API key must be caught here, at startup, rather than
/// surfacing as a 403 on the first outbound call.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.youtube.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "youtube.api_key must be set (or VIDRAIL__YOUTUBE__API_KEY)".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.ttl_secs must be greater than 0".to_string(),
        ));
    }

    if config.ingest.enabled && config.ingest.interval_mins == 0 {
        return Err(ConfigError::ValidationError(
            "ingest.interval_mins must be greater than 0 when ingest is enabled".to_string(),
        ));
    }

    Ok(())
}
