//! Report pipeline: runs every analytics operation over one snapshot and
//! bundles the results into a single serialisable value for the UI/storage
//! layer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mealscope_core::analytics::MealAnalyzer;
use mealscope_core::models::{Meal, MealTag};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the insights report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// ISO-8601 rendering of the reference instant the report was built for.
    pub generated_at: String,
    /// Number of meals in the analysed snapshot.
    pub meals_analyzed: usize,
    /// Number of pattern flags that triggered.
    pub patterns_detected: usize,
    /// Wall-clock seconds spent computing the report.
    pub compute_time_seconds: f64,
}

/// The complete output of [`build_report`].
///
/// Everything the out-of-scope presentation layer needs: histograms, the
/// late-night ratio, and the triggered pattern labels in rule order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    /// Local hour of day (0–23) → meal count. Hours without meals are absent.
    pub hour_histogram: HashMap<u32, usize>,
    /// The busiest eating hour, ties broken by the lowest hour. `None` when
    /// the snapshot is empty.
    pub most_common_hour: Option<u32>,
    /// Share of meals at or after the late-night hour, in [0, 1].
    pub late_night_ratio: f64,
    /// Tag → count of meals carrying it. Unobserved tags are absent.
    pub tag_histogram: HashMap<MealTag, usize>,
    /// Triggered pattern labels, in fixed rule order.
    pub patterns: Vec<String>,
    /// Metadata about this report.
    pub metadata: ReportMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analytics pass over a meal snapshot.
///
/// `now` is the reference instant for the time-windowed rules and is echoed
/// into the metadata; given the same snapshot and the same `now`, the report
/// content is identical (only `compute_time_seconds` varies).
pub fn build_report(meals: &[Meal], now: DateTime<Utc>, analyzer: &MealAnalyzer) -> InsightsReport {
    let started = std::time::Instant::now();

    let hour_histogram = analyzer.hour_histogram(meals);
    let most_common_hour = analyzer.most_common_hour(meals);
    let late_night_ratio = analyzer.late_night_ratio(meals);
    let tag_histogram = analyzer.tag_histogram(meals);
    let patterns: Vec<String> = analyzer
        .detect_patterns(meals, now)
        .into_iter()
        .map(|p| p.label().to_string())
        .collect();

    let metadata = ReportMetadata {
        generated_at: now.to_rfc3339(),
        meals_analyzed: meals.len(),
        patterns_detected: patterns.len(),
        compute_time_seconds: started.elapsed().as_secs_f64(),
    };

    InsightsReport {
        hour_histogram,
        most_common_hour,
        late_night_ratio,
        tag_histogram,
        patterns,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
