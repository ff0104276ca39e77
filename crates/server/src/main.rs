use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidrail_core::{
    load_config, seed, validate_config, IngestRunner, SqliteStore, StrategyEngine, TtlCache,
    VideoSearch, VideoStore, YouTubeGateway,
};

use vidrail_server::api::create_router;
use vidrail_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("VIDRAIL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    // Open the store and apply the built-in seed data
    let store: Arc<dyn VideoStore> = Arc::new(
        SqliteStore::new(&config.database.path).context("Failed to open video store")?,
    );
    if config.database.seed_on_start {
        let report = store
            .seed(seed::DEFAULT_CHANNELS, seed::DEFAULT_CATEGORIES)
            .context("Failed to seed configuration data")?;
        info!(
            channels = report.channels,
            subcategories = report.subcategories,
            links = report.links,
            "Seed data applied"
        );
    }

    // Search gateway and strategy engine
    let gateway: Arc<dyn VideoSearch> = Arc::new(YouTubeGateway::new(&config.youtube));
    let engine = Arc::new(StrategyEngine::new(
        gateway,
        Duration::from_millis(config.ingest.channel_pause_ms),
    ));

    // Serving-path cache
    let cache = Arc::new(TtlCache::new(Duration::from_secs(config.cache.ttl_secs)));

    // Ingestion runner, optionally on a schedule
    let ingest = Arc::new(IngestRunner::new(
        Arc::clone(&store),
        Arc::clone(&engine),
        Duration::from_millis(config.ingest.subcategory_pause_ms),
    ));
    if config.ingest.enabled {
        info!(
            interval_mins = config.ingest.interval_mins,
            "Scheduled ingestion enabled"
        );
        Arc::clone(&ingest).spawn_scheduled(Duration::from_secs(config.ingest.interval_mins * 60));
    }

    let state = Arc::new(AppState::new(
        config.clone(),
        store,
        engine,
        cache,
        Arc::clone(&ingest),
    ));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    ingest.shutdown();

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
