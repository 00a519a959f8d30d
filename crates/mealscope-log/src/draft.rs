use chrono::{DateTime, Utc};

use mealscope_core::error::Result;
use mealscope_core::models::{FoodItem, Meal, MealTag};

// ── MealDraft ─────────────────────────────────────────────────────────────────

/// A meal while it is still being put together.
///
/// Unlike a saved [`Meal`], a draft may have an empty food list and its tag
/// selection toggles freely. [`MealDraft::build`] runs the saved-meal
/// validation and hands back an immutable record.
#[derive(Debug, Clone)]
pub struct MealDraft {
    timestamp: DateTime<Utc>,
    foods: Vec<FoodItem>,
    tags: Vec<MealTag>,
}

impl MealDraft {
    /// Start an empty draft for a meal eaten at `timestamp`.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            foods: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Change when the meal was eaten.
    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = timestamp;
    }

    /// Append a food entry. An empty quantity is stored as `"-"`.
    pub fn add_food(&mut self, name: impl Into<String>, quantity: impl Into<String>) {
        self.foods.push(FoodItem::new(name, quantity));
    }

    /// Remove the food entry at `index`, if it exists.
    pub fn remove_food(&mut self, index: usize) {
        if index < self.foods.len() {
            self.foods.remove(index);
        }
    }

    /// Select `tag` if unselected, deselect it otherwise.
    pub fn toggle_tag(&mut self, tag: MealTag) {
        if let Some(pos) = self.tags.iter().position(|t| *t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag);
        }
    }

    /// Foods added so far.
    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Tags selected so far.
    pub fn tags(&self) -> &[MealTag] {
        &self.tags
    }

    /// Whether the draft can be saved yet.
    pub fn is_saveable(&self) -> bool {
        !self.foods.is_empty()
    }

    /// Validate the draft and produce an immutable [`Meal`].
    ///
    /// Fails when no food has been added; the draft is left untouched so the
    /// caller can keep editing.
    pub fn build(&self) -> Result<Meal> {
        Meal::new(self.timestamp, self.foods.clone(), self.tags.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
