use tracing::debug;
use uuid::Uuid;

use mealscope_core::models::Meal;

// ── MealLog ───────────────────────────────────────────────────────────────────

/// In-memory collection of saved meals.
///
/// The log owns its records; the analytics engine never reads it directly.
/// Consumers take a [`MealLog::snapshot`] and analyse that, so a meal deleted
/// here has no effect on a report computed from an earlier snapshot.
#[derive(Debug, Default)]
pub struct MealLog {
    meals: Vec<Meal>,
}

impl MealLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a meal and return its id.
    ///
    /// `Meal` values are validated at construction, so storing is infallible.
    pub fn save(&mut self, meal: Meal) -> Uuid {
        let id = meal.id;
        debug!(%id, foods = meal.foods.len(), tags = meal.tags.len(), "meal saved");
        self.meals.push(meal);
        id
    }

    /// Delete the meal with the given id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != id);
        let removed = self.meals.len() < before;
        if removed {
            debug!(%id, "meal removed");
        }
        removed
    }

    /// Look up a meal by id.
    pub fn get(&self, id: Uuid) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Number of saved meals.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Whether the log holds no meals.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// An owned copy of the current collection.
    ///
    /// Mutating the log afterwards never affects a snapshot already taken.
    pub fn snapshot(&self) -> Vec<Meal> {
        self.meals.clone()
    }

    /// Iterate over the saved meals.
    pub fn iter(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mealscope_core::models::{FoodItem, MealTag};

    fn make_meal(hour: u32) -> Meal {
        Meal::new(
            Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap(),
            vec![FoodItem::new("rice", "1 cup")],
            vec![MealTag::Meal],
        )
        .unwrap()
    }

    // ── save / get ───────────────────────────────────────────────────────

    #[test]
    fn test_save_and_get() {
        let mut log = MealLog::new();
        let id = log.save(make_meal(12));
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(id).unwrap().id, id);
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let log = MealLog::new();
        assert!(log.get(Uuid::new_v4()).is_none());
    }

    // ── remove ───────────────────────────────────────────────────────────

    #[test]
    fn test_remove_existing_meal() {
        let mut log = MealLog::new();
        let id = log.save(make_meal(12));
        assert!(log.remove(id));
        assert!(log.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_returns_false() {
        let mut log = MealLog::new();
        log.save(make_meal(12));
        assert!(!log.remove(Uuid::new_v4()));
        assert_eq!(log.len(), 1);
    }

    // ── snapshot ─────────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let mut log = MealLog::new();
        let id = log.save(make_meal(12));
        log.save(make_meal(18));

        let snap = log.snapshot();
        assert_eq!(snap.len(), 2);

        log.remove(id);
        log.save(make_meal(21));

        // The snapshot still reflects the state at the time it was taken.
        assert_eq!(snap.len(), 2);
        assert!(snap.iter().any(|m| m.id == id));
    }

    #[test]
    fn test_empty_log_snapshot() {
        assert!(MealLog::new().snapshot().is_empty());
    }

    // ── iter ─────────────────────────────────────────────────────────────

    #[test]
    fn test_iter_visits_all_meals() {
        let mut log = MealLog::new();
        log.save(make_meal(8));
        log.save(make_meal(13));
        assert_eq!(log.iter().count(), 2);
    }
}
