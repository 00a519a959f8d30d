use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InsightError;

// ── MealTag ───────────────────────────────────────────────────────────────────

/// Qualitative label describing the context of a meal.
///
/// The set is closed: rule evaluation in the analytics engine matches on it
/// exhaustively, and no dynamic extension is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MealTag {
    /// A small bite between proper meals.
    Snack,
    /// A regular, full meal.
    Meal,
    /// Eaten late in the evening (21:00 or later).
    LateNight,
    /// Eaten in response to stress rather than hunger.
    Stress,
    /// Eaten in company.
    Social,
    /// Self-assessed as a healthy choice.
    Healthy,
}

impl MealTag {
    /// Every tag, in declaration order.
    pub const ALL: [MealTag; 6] = [
        MealTag::Snack,
        MealTag::Meal,
        MealTag::LateNight,
        MealTag::Stress,
        MealTag::Social,
        MealTag::Healthy,
    ];

    /// The canonical camelCase name, matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MealTag::Snack => "snack",
            MealTag::Meal => "meal",
            MealTag::LateNight => "lateNight",
            MealTag::Stress => "stress",
            MealTag::Social => "social",
            MealTag::Healthy => "healthy",
        }
    }
}

impl fmt::Display for MealTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealTag {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| InsightError::UnknownTag(s.to_string()))
    }
}

// ── FoodItem ──────────────────────────────────────────────────────────────────

/// A single food entry within a meal. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Unique identifier for this item.
    pub id: Uuid,
    /// What was eaten (free text).
    pub name: String,
    /// Free-text amount, e.g. `"2 slices"`. `"-"` when not given.
    pub quantity: String,
}

impl FoodItem {
    /// Create a food item with a fresh id.
    ///
    /// An empty quantity is stored as `"-"` so list displays always have
    /// something to show.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        let quantity = quantity.into();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: if quantity.is_empty() {
                "-".to_string()
            } else {
                quantity
            },
        }
    }
}

// ── Meal ──────────────────────────────────────────────────────────────────────

/// A logged eating event.
///
/// Construction goes through [`Meal::new`], which enforces the invariants the
/// analytics engine relies on: at least one food item, and no duplicate tags.
/// A stored meal is read-only; deletion happens at the log level and has no
/// effect on snapshots already handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier for this meal.
    pub id: Uuid,
    /// When the meal was eaten (UTC; converted to the user's local timezone
    /// for hour-of-day and calendar-day analysis).
    pub timestamp: DateTime<Utc>,
    /// What was eaten. Never empty for a saved meal.
    pub foods: Vec<FoodItem>,
    /// Context tags. A set, so duplicates are impossible once constructed.
    pub tags: BTreeSet<MealTag>,
}

impl Meal {
    /// Validate and build a meal with a fresh id.
    ///
    /// Rejects an empty food list and any tag that appears more than once in
    /// `tags`; well-formed records are the contract the engine trusts.
    pub fn new(
        timestamp: DateTime<Utc>,
        foods: Vec<FoodItem>,
        tags: Vec<MealTag>,
    ) -> crate::error::Result<Self> {
        if foods.is_empty() {
            return Err(InsightError::EmptyFoodList);
        }

        let mut tag_set = BTreeSet::new();
        for tag in tags {
            if !tag_set.insert(tag) {
                return Err(InsightError::DuplicateTag(tag));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            timestamp,
            foods,
            tags: tag_set,
        })
    }

    /// Whether this meal carries `tag`.
    pub fn has_tag(&self, tag: MealTag) -> bool {
        self.tags.contains(&tag)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
