//! Ingestion pass execution and scheduling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::metrics;
use crate::store::VideoStore;
use crate::strategy::StrategyEngine;

use super::{IngestError, IngestReport};

/// Runs ingestion passes over the active subcategories.
///
/// Only one pass runs at a time; overlapping triggers are rejected with
/// [`IngestError::AlreadyRunning`]. Cancellation takes effect between
/// subcategories, each of which has already committed its writes.
pub struct IngestRunner {
    store: Arc<dyn VideoStore>,
    engine: Arc<StrategyEngine>,
    subcategory_pause: Duration,
    running: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl IngestRunner {
    pub fn new(
        store: Arc<dyn VideoStore>,
        engine: Arc<StrategyEngine>,
        subcategory_pause: Duration,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            store,
            engine,
            subcategory_pause,
            running: Arc::new(AtomicBool::new(false)),
            cancelled: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    /// Whether a pass is currently executing.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request cancellation of the in-flight pass. Takes effect before the
    /// next subcategory starts.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Run one full ingestion pass.
    pub async fn run_pass(&self) -> Result<IngestReport, IngestError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(IngestError::AlreadyRunning);
        }
        self.cancelled.store(false, Ordering::SeqCst);

        let result = self.run_pass_inner().await;
        self.running.store(false, Ordering::SeqCst);
        result
    }

    async fn run_pass_inner(&self) -> Result<IngestReport, IngestError> {
        let start = Instant::now();
        let plans = self.store.active_subcategories()?;
        info!(subcategories = plans.len(), "Starting ingestion pass");

        let mut report = IngestReport::default();
        let total = plans.len();

        for (i, plan) in plans.iter().enumerate() {
            if self.cancelled.load(Ordering::SeqCst) {
                info!(
                    processed = report.processed,
                    remaining = total - i,
                    "Ingestion pass cancelled"
                );
                break;
            }

            debug!(
                category = %plan.category,
                subcategory = %plan.name,
                strategy = %plan.strategy,
                "Processing subcategory"
            );

            let videos = self.engine.fetch(plan).await;
            report.processed += 1;

            if videos.is_empty() {
                debug!(
                    category = %plan.category,
                    subcategory = %plan.name,
                    "No videos fetched"
                );
                metrics::INGEST_SUBCATEGORIES
                    .with_label_values(&["empty"])
                    .inc();
            } else {
                match self.store.upsert_videos(&videos) {
                    Ok(saved) => {
                        report.videos_saved += saved;
                        metrics::VIDEOS_UPSERTED.inc_by(saved as u64);
                        metrics::INGEST_SUBCATEGORIES
                            .with_label_values(&["ok"])
                            .inc();
                    }
                    Err(e) => {
                        // One bad subcategory must not abort the pass.
                        warn!(
                            category = %plan.category,
                            subcategory = %plan.name,
                            error = %e,
                            "Failed to save videos, continuing"
                        );
                        report.failed += 1;
                        metrics::INGEST_SUBCATEGORIES
                            .with_label_values(&["failed"])
                            .inc();
                    }
                }
            }

            // Outbound rate limiting between subcategories.
            if i + 1 < total && !self.subcategory_pause.is_zero() {
                tokio::time::sleep(self.subcategory_pause).await;
            }
        }

        metrics::INGEST_PASSES.inc();
        info!(
            processed = report.processed,
            videos_saved = report.videos_saved,
            failed = report.failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Ingestion pass complete"
        );
        Ok(report)
    }

    /// Spawn the periodic ingestion loop. The first pass runs after one
    /// full interval, not at startup.
    pub fn spawn_scheduled(self: Arc<Self>, interval: Duration) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!(interval_secs = interval.as_secs(), "Ingestion loop started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Ingestion loop received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        match self.run_pass().await {
                            Ok(report) => debug!(
                                videos_saved = report.videos_saved,
                                "Scheduled ingestion pass finished"
                            ),
                            Err(IngestError::AlreadyRunning) => {
                                warn!("Skipping scheduled pass, previous one still running");
                            }
                            Err(e) => error!(error = %e, "Scheduled ingestion pass failed"),
                        }
                    }
                }
            }
        });
    }

    /// Stop the scheduled loop and cancel any in-flight pass.
    pub fn shutdown(&self) {
        self.cancel();
        let _ = self.shutdown_tx.send(());
    }
}
