use thiserror::Error;

use crate::models::MealTag;

/// All errors produced by the Mealscope crates.
///
/// The analytics engine itself is total over well-formed input and never
/// constructs these; they arise when validating records on their way into
/// the meal log, or from timezone configuration.
#[derive(Error, Debug)]
pub enum InsightError {
    /// A meal was submitted with no food items.
    #[error("A meal must contain at least one food item")]
    EmptyFoodList,

    /// The same tag appeared more than once on a single meal.
    #[error("Duplicate tag on meal: {0}")]
    DuplicateTag(MealTag),

    /// A tag name string is not one of the recognised tags.
    #[error("Unknown meal tag: {0}")]
    UnknownTag(String),

    /// A timezone name is not a recognised IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the Mealscope crates.
pub type Result<T> = std::result::Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_food_list() {
        let err = InsightError::EmptyFoodList;
        assert_eq!(err.to_string(), "A meal must contain at least one food item");
    }

    #[test]
    fn test_error_display_duplicate_tag() {
        let err = InsightError::DuplicateTag(MealTag::Stress);
        let msg = err.to_string();
        assert!(msg.contains("Duplicate tag"));
        assert!(msg.contains("stress"));
    }

    #[test]
    fn test_error_display_unknown_tag() {
        let err = InsightError::UnknownTag("brunch".to_string());
        assert_eq!(err.to_string(), "Unknown meal tag: brunch");
    }

    #[test]
    fn test_error_display_invalid_timezone() {
        let err = InsightError::InvalidTimezone("Mars/Olympus".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn test_error_display_config() {
        let err = InsightError::Config("bad refresh interval".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad refresh interval");
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: InsightError = anyhow::anyhow!("something else").into();
        assert!(err.to_string().contains("something else"));
    }
}
