//! TTL-cached report manager.
//!
//! Wraps [`build_report`] over a shared [`MealLog`] with a time-to-live
//! cache. Callers use [`ReportManager::get_report`] to obtain a
//! fresh-or-cached [`InsightsReport`]; the manager handles staleness checks
//! and falls back to the previous cache when the log lock is unavailable.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;

use mealscope_core::analytics::MealAnalyzer;
use mealscope_log::log::MealLog;
use mealscope_log::report::{build_report, InsightsReport};

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Default cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

// ── ReportManager ─────────────────────────────────────────────────────────────

/// TTL-cached wrapper around the insights report pipeline.
pub struct ReportManager {
    /// Maximum age of a cached report before it is considered stale.
    cache_ttl: Duration,
    /// The shared meal log snapshots are taken from.
    log: Arc<RwLock<MealLog>>,
    /// Analyzer used for every rebuild.
    analyzer: MealAnalyzer,
    /// Most recently built report.
    cache: Option<InsightsReport>,
    /// When the cache was last populated.
    cache_timestamp: Option<Instant>,
    /// Human-readable description of the last failure, if any.
    last_error: Option<String>,
}

impl ReportManager {
    /// Create a new manager.
    ///
    /// # Parameters
    /// - `cache_ttl_secs` – seconds before a cached report is considered stale.
    /// - `log`            – shared meal log to snapshot on each rebuild.
    /// - `analyzer`       – configured analytics engine.
    pub fn new(cache_ttl_secs: u64, log: Arc<RwLock<MealLog>>, analyzer: MealAnalyzer) -> Self {
        Self {
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            log,
            analyzer,
            cache: None,
            cache_timestamp: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return an insights report, using the cache when it is still valid.
    ///
    /// When `force_refresh` is `true` the cache is bypassed and a rebuild is
    /// always attempted. If the log lock is poisoned the previous cache (if
    /// any) is returned as a best-effort fallback.
    pub fn get_report(&mut self, force_refresh: bool) -> Option<&InsightsReport> {
        if !force_refresh && self.is_cache_valid() {
            tracing::debug!("returning cached insights report");
            return self.cache.as_ref();
        }

        match self.build_fresh() {
            Ok(report) => {
                tracing::debug!(
                    meals = report.metadata.meals_analyzed,
                    patterns = report.metadata.patterns_detected,
                    "insights cache updated"
                );
                self.cache = Some(report);
                self.cache_timestamp = Some(Instant::now());
                self.last_error = None;
                self.cache.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "report rebuild failed; falling back to cached report");
                self.last_error = Some(e);
                // Return whatever we have, even if stale.
                self.cache.as_ref()
            }
        }
    }

    /// Discard the current cache, forcing the next [`ReportManager::get_report`]
    /// call to rebuild.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the current cache entry, or `None` if no report has been built.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    /// Human-readable description of the last rebuild failure, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// `true` when the cache holds a report that is still within its TTL.
    fn is_cache_valid(&self) -> bool {
        match (self.cache.as_ref(), self.cache_timestamp) {
            (Some(_), Some(ts)) => ts.elapsed() < self.cache_ttl,
            _ => false,
        }
    }

    /// Snapshot the log and run the full analytics pass.
    fn build_fresh(&self) -> Result<InsightsReport, String> {
        let snapshot = self
            .log
            .read()
            .map_err(|e| format!("meal log lock poisoned: {e}"))?
            .snapshot();

        Ok(build_report(&snapshot, Utc::now(), &self.analyzer))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
