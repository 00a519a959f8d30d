//! Async insights orchestrator.
//!
//! Recomputes the insights report in a tokio task and sends periodic
//! [`InsightsSnapshot`]s through an `mpsc` channel, so a UI event loop can
//! consume fresh analytics without ever blocking on the computation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use mealscope_core::analytics::MealAnalyzer;
use mealscope_log::log::MealLog;
use mealscope_log::report::InsightsReport;
use mealscope_log::summary::{summary_cards, InsightCard};

use crate::report_manager::{ReportManager, DEFAULT_CACHE_TTL_SECS};

// ── Public types ──────────────────────────────────────────────────────────────

/// A single insights snapshot forwarded to the presentation layer.
///
/// This is the primary data contract between the background runtime and
/// whatever displays the analytics.
#[derive(Debug, Clone)]
pub struct InsightsSnapshot {
    /// Full report from the analytics pipeline.
    pub report: InsightsReport,
    /// Headline cards derived from the report.
    pub cards: Vec<InsightCard>,
    /// Number of meals in the analysed snapshot.
    pub meal_count: usize,
}

// ── InsightsOrchestrator ──────────────────────────────────────────────────────

/// Background insights coordinator.
///
/// Call [`InsightsOrchestrator::start`] to spin up the refresh loop in a
/// dedicated tokio task and receive a channel endpoint for
/// [`InsightsSnapshot`] updates.
pub struct InsightsOrchestrator {
    /// How often to refresh the report.
    update_interval: Duration,
    /// Shared meal log to snapshot on each refresh.
    log: Arc<RwLock<MealLog>>,
    /// Configured analytics engine.
    analyzer: MealAnalyzer,
}

impl InsightsOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Parameters
    /// - `update_interval_secs` – seconds between refreshes.
    /// - `log`                  – shared meal log.
    /// - `analyzer`             – configured analytics engine.
    pub fn new(
        update_interval_secs: u64,
        log: Arc<RwLock<MealLog>>,
        analyzer: MealAnalyzer,
    ) -> Self {
        Self {
            update_interval: Duration::from_secs(update_interval_secs),
            log,
            analyzer,
        }
    }

    /// Start the refresh loop.
    ///
    /// Spawns a tokio task that runs the loop. Returns:
    /// - An `mpsc::Receiver<InsightsSnapshot>` for the caller to poll.
    /// - An [`InsightsHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<InsightsSnapshot>, InsightsHandle) {
        // Buffer a modest number of snapshots so slow consumers don't stall the loop.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.refresh_loop(tx).await;
        });

        (rx, InsightsHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main refresh loop.
    ///
    /// Performs an immediate rebuild on startup, then repeats on
    /// `update_interval`. The loop exits when the receiver side of the
    /// channel is closed.
    async fn refresh_loop(self, tx: mpsc::Sender<InsightsSnapshot>) {
        let mut manager = ReportManager::new(DEFAULT_CACHE_TTL_SECS, self.log, self.analyzer);

        // Initial rebuild (forced, to populate immediately).
        Self::fetch_and_send(&mut manager, &tx, true).await;

        let mut interval = time::interval(self.update_interval);
        // Consume the first tick which fires immediately; we already sent above.
        interval.tick().await;

        loop {
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("insights channel closed; exiting loop");
                break;
            }

            Self::fetch_and_send(&mut manager, &tx, false).await;
        }
    }

    /// Rebuild the report and send an [`InsightsSnapshot`] to the channel.
    async fn fetch_and_send(
        manager: &mut ReportManager,
        tx: &mpsc::Sender<InsightsSnapshot>,
        force: bool,
    ) {
        let report = match manager.get_report(force) {
            Some(r) => r.clone(),
            None => {
                tracing::warn!("no insights report available; skipping send");
                return;
            }
        };

        let cards = summary_cards(&report);
        let meal_count = report.metadata.meals_analyzed;

        let snapshot = InsightsSnapshot {
            report,
            cards,
            meal_count,
        };

        if let Err(e) = tx.send(snapshot).await {
            tracing::warn!(error = %e, "failed to send insights snapshot; receiver dropped");
        }
    }
}

// ── InsightsHandle ────────────────────────────────────────────────────────────

/// A handle to the background refresh task.
///
/// Drop or call [`InsightsHandle::abort`] to stop the loop.
pub struct InsightsHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl InsightsHandle {
    /// Immediately abort the refresh loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
