use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Meal, MealTag};
use crate::statistics::population_variance;
use crate::time_utils::TimezoneHandler;

// ── MealRecord ────────────────────────────────────────────────────────────────

/// Interface for any timestamped, tagged eating record the analytics engine
/// can run over.
pub trait MealRecord {
    /// When the meal was eaten (UTC).
    fn timestamp(&self) -> DateTime<Utc>;
    /// Context tags attached to the meal.
    fn tags(&self) -> &BTreeSet<MealTag>;
}

impl MealRecord for Meal {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn tags(&self) -> &BTreeSet<MealTag> {
        &self.tags
    }
}

// ── DetectionRules ────────────────────────────────────────────────────────────

/// Thresholds driving rule-based pattern detection.
#[derive(Debug, Clone)]
pub struct DetectionRules {
    /// Local hour at or after which a meal counts as late-night.
    pub late_night_start_hour: u32,
    /// Late-night meal ratio above which the late-night pattern triggers.
    pub late_night_ratio_threshold: f64,
    /// Look-back window, in days, for the stress-eating rule.
    pub stress_window_days: i64,
    /// Minimum stress-tagged meals inside the window to trigger the rule.
    pub stress_meal_threshold: usize,
    /// Population variance of per-day meal counts above which the schedule
    /// counts as irregular.
    pub schedule_variance_threshold: f64,
}

impl Default for DetectionRules {
    fn default() -> Self {
        Self {
            late_night_start_hour: 21,
            late_night_ratio_threshold: 0.30,
            stress_window_days: 7,
            stress_meal_threshold: 3,
            schedule_variance_threshold: 2.0,
        }
    }
}

// ── Pattern ───────────────────────────────────────────────────────────────────

/// A rule-triggered behavioural flag.
///
/// The vocabulary is closed; [`Pattern::label`] yields the fixed display
/// string for each flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// More than the threshold share of meals fall at or after the
    /// late-night hour.
    FrequentLateNight,
    /// Several stress-tagged meals within the recent look-back window.
    StressEating,
    /// Per-day meal counts vary widely across active days.
    IrregularSchedule,
}

impl Pattern {
    /// The fixed display string for this flag.
    pub fn label(&self) -> &'static str {
        match self {
            Pattern::FrequentLateNight => "Frequent late-night eating detected",
            Pattern::StressEating => "Stress-related eating pattern detected",
            Pattern::IrregularSchedule => "Irregular eating schedule",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── MealAnalyzer ──────────────────────────────────────────────────────────────

/// Stateless analytics over a snapshot of meal records.
///
/// Constructed once from a timezone and a rule set, then invoked with a
/// meal collection (and, for pattern detection, an injected "now"). Every
/// operation is a pure function of its arguments: same snapshot and same
/// reference instant always produce the same output, and nothing here
/// mutates shared state, so concurrent invocations are trivially safe.
pub struct MealAnalyzer {
    tz: TimezoneHandler,
    rules: DetectionRules,
}

impl MealAnalyzer {
    /// Create an analyzer for the given IANA timezone name.
    ///
    /// An unrecognised name falls back to UTC (see [`TimezoneHandler::new`]).
    pub fn new(tz_name: &str, rules: DetectionRules) -> Self {
        Self {
            tz: TimezoneHandler::new(tz_name),
            rules,
        }
    }

    /// Create an analyzer using the system timezone and default rules.
    pub fn with_system_timezone() -> Self {
        Self {
            tz: TimezoneHandler::system(),
            rules: DetectionRules::default(),
        }
    }

    /// The rule set this analyzer evaluates.
    pub fn rules(&self) -> &DetectionRules {
        &self.rules
    }

    // ── Histograms and ratios ─────────────────────────────────────────────

    /// Count meals by local hour of day (0–23).
    ///
    /// Hours with no meals are absent from the map; an empty collection
    /// yields an empty map.
    pub fn hour_histogram<M: MealRecord>(&self, meals: &[M]) -> HashMap<u32, usize> {
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for meal in meals {
            let hour = self.tz.local_hour(meal.timestamp());
            *counts.entry(hour).or_insert(0) += 1;
        }
        counts
    }

    /// The hour with the most meals, ties broken by the lowest hour.
    ///
    /// Returns `None` for an empty collection.
    pub fn most_common_hour<M: MealRecord>(&self, meals: &[M]) -> Option<u32> {
        self.hour_histogram(meals)
            .into_iter()
            .min_by_key(|&(hour, count)| (std::cmp::Reverse(count), hour))
            .map(|(hour, _)| hour)
    }

    /// Share of meals eaten at or after the late-night hour, in [0, 1].
    ///
    /// Exactly `0.0` for an empty collection.
    pub fn late_night_ratio<M: MealRecord>(&self, meals: &[M]) -> f64 {
        if meals.is_empty() {
            return 0.0;
        }
        let late = meals
            .iter()
            .filter(|m| self.tz.local_hour(m.timestamp()) >= self.rules.late_night_start_hour)
            .count();
        late as f64 / meals.len() as f64
    }

    /// Count meals per tag.
    ///
    /// A meal carrying several tags increments each of them once. Tags never
    /// observed are absent from the map rather than present with zero.
    pub fn tag_histogram<M: MealRecord>(&self, meals: &[M]) -> HashMap<MealTag, usize> {
        let mut counts: HashMap<MealTag, usize> = HashMap::new();
        for meal in meals {
            for tag in meal.tags() {
                *counts.entry(*tag).or_insert(0) += 1;
            }
        }
        counts
    }

    // ── Pattern detection ─────────────────────────────────────────────────

    /// Evaluate every rule against the snapshot, in fixed order.
    ///
    /// `now` is injected rather than read from a clock so results are
    /// reproducible. Each rule appends its flag independently; the output
    /// order is always late-night, stress, irregular-schedule.
    pub fn detect_patterns<M: MealRecord>(
        &self,
        meals: &[M],
        now: DateTime<Utc>,
    ) -> Vec<Pattern> {
        let mut patterns = Vec::new();

        if self.late_night_ratio(meals) > self.rules.late_night_ratio_threshold {
            patterns.push(Pattern::FrequentLateNight);
        }

        if self.stress_meals_in_window(meals, now) >= self.rules.stress_meal_threshold {
            patterns.push(Pattern::StressEating);
        }

        if self.is_irregular_schedule(meals) {
            patterns.push(Pattern::IrregularSchedule);
        }

        patterns
    }

    // ── Private rule helpers ──────────────────────────────────────────────

    /// Meals tagged `stress` whose timestamp lies within the look-back
    /// window ending at `now`. The window start is inclusive.
    fn stress_meals_in_window<M: MealRecord>(&self, meals: &[M], now: DateTime<Utc>) -> usize {
        let window_start = now - chrono::Duration::days(self.rules.stress_window_days);
        meals
            .iter()
            .filter(|m| m.timestamp() >= window_start && m.tags().contains(&MealTag::Stress))
            .count()
    }

    /// Whether per-day meal counts vary beyond the variance threshold.
    ///
    /// Grouping is by local calendar day; only days with at least one meal
    /// participate. Fewer than two distinct days can never be irregular.
    fn is_irregular_schedule<M: MealRecord>(&self, meals: &[M]) -> bool {
        let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
        for meal in meals {
            let day = self.tz.local_date(meal.timestamp());
            *per_day.entry(day).or_insert(0) += 1;
        }

        if per_day.len() < 2 {
            return false;
        }

        let counts: Vec<f64> = per_day.values().map(|&c| c as f64).collect();
        population_variance(&counts) > self.rules.schedule_variance_threshold
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
