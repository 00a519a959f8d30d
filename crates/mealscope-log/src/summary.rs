use serde::{Deserialize, Serialize};

use mealscope_core::formatting::{format_hour, format_percent};

use crate::report::InsightsReport;

// ── InsightCard ───────────────────────────────────────────────────────────────

/// One headline statistic, ready for display by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCard {
    /// Short card title, e.g. `"Late-Night Eating"`.
    pub title: String,
    /// The headline value, e.g. `"40%"` or `"12:00"`.
    pub value: String,
    /// One-line explanation of what the value means.
    pub description: String,
}

// ── Summary cards ─────────────────────────────────────────────────────────────

/// Derive the headline cards from a report.
///
/// Always two cards, in fixed order: the late-night share (whole percent,
/// truncated) and the most active eating hour (`"-"` when the snapshot had
/// no meals).
pub fn summary_cards(report: &InsightsReport) -> Vec<InsightCard> {
    let most_active = match report.most_common_hour {
        Some(hour) => format_hour(hour),
        None => "-".to_string(),
    };

    vec![
        InsightCard {
            title: "Late-Night Eating".to_string(),
            value: format_percent(report.late_night_ratio),
            description: "of meals after 9PM".to_string(),
        },
        InsightCard {
            title: "Most Active Time".to_string(),
            value: most_active,
            description: "peak eating window".to_string(),
        },
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_report;
    use chrono::{TimeZone, Utc};
    use mealscope_core::analytics::{DetectionRules, MealAnalyzer};
    use mealscope_core::models::{FoodItem, Meal};

    fn report_for(hours: &[u32]) -> InsightsReport {
        let analyzer = MealAnalyzer::new("UTC", DetectionRules::default());
        let meals: Vec<Meal> = hours
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                Meal::new(
                    Utc.with_ymd_and_hms(2024, 3, i as u32 + 1, h, 0, 0).unwrap(),
                    vec![FoodItem::new("something", "1")],
                    vec![],
                )
                .unwrap()
            })
            .collect();
        let now = Utc.with_ymd_and_hms(2024, 3, 28, 12, 0, 0).unwrap();
        build_report(&meals, now, &analyzer)
    }

    #[test]
    fn test_cards_for_mixed_hours() {
        // 2 of 5 meals late → 40%, busiest hour 12.
        let report = report_for(&[22, 23, 12, 12, 12]);
        let cards = summary_cards(&report);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Late-Night Eating");
        assert_eq!(cards[0].value, "40%");
        assert_eq!(cards[1].title, "Most Active Time");
        assert_eq!(cards[1].value, "12:00");
    }

    #[test]
    fn test_cards_for_empty_snapshot() {
        let report = report_for(&[]);
        let cards = summary_cards(&report);

        assert_eq!(cards[0].value, "0%");
        assert_eq!(cards[1].value, "-");
    }

    #[test]
    fn test_card_serde_round_trip() {
        let card = InsightCard {
            title: "Late-Night Eating".to_string(),
            value: "34%".to_string(),
            description: "of meals after 9PM".to_string(),
        };
        let json = serde_json::to_string(&card).unwrap();
        let back: InsightCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
