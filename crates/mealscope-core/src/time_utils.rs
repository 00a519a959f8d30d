use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly. Falls back to `"UTC"` if
/// detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ── TimezoneHandler ───────────────────────────────────────────────────────────

/// Converts UTC timestamps into the user's local calendar components.
///
/// Hour-of-day and calendar-day analysis depend on the local timezone: the
/// same UTC instant can be a late-night meal in one zone and an afternoon
/// meal in another.
pub struct TimezoneHandler {
    default_tz: Tz,
}

impl TimezoneHandler {
    /// Create a handler with the given IANA timezone name.
    ///
    /// If `tz_name` is not a recognised IANA timezone, falls back to UTC
    /// and logs a warning.
    pub fn new(tz_name: &str) -> Self {
        let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "TimezoneHandler: unrecognised timezone \"{}\", falling back to UTC",
                tz_name
            );
            Tz::UTC
        });
        Self { default_tz: tz }
    }

    /// Create a handler using the system timezone.
    pub fn system() -> Self {
        Self::new(&get_system_timezone())
    }

    /// Validate that `tz_name` is a recognised IANA timezone identifier.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name.parse::<Tz>().is_ok()
    }

    /// Local hour of day (0–23) for a UTC instant.
    pub fn local_hour(&self, dt: DateTime<Utc>) -> u32 {
        dt.with_timezone(&self.default_tz).hour()
    }

    /// Local calendar day for a UTC instant.
    ///
    /// Two meals map to the same date exactly when they fall between the same
    /// local midnights, which is the grouping the schedule-regularity rule
    /// needs.
    pub fn local_date(&self, dt: DateTime<Utc>) -> NaiveDate {
        dt.with_timezone(&self.default_tz).date_naive()
    }

    /// Expose the configured timezone.
    pub fn default_tz(&self) -> Tz {
        self.default_tz
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ── validate_timezone ────────────────────────────────────────────────

    #[test]
    fn test_validate_timezone_valid() {
        assert!(TimezoneHandler::validate_timezone("America/New_York"));
        assert!(TimezoneHandler::validate_timezone("Europe/London"));
        assert!(TimezoneHandler::validate_timezone("UTC"));
    }

    #[test]
    fn test_validate_timezone_invalid() {
        assert!(!TimezoneHandler::validate_timezone("Mars/Olympus"));
        assert!(!TimezoneHandler::validate_timezone(""));
    }

    // ── new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_new_valid_timezone() {
        let handler = TimezoneHandler::new("Asia/Tokyo");
        assert_eq!(handler.default_tz(), Tz::Asia__Tokyo);
    }

    #[test]
    fn test_new_invalid_timezone_falls_back_to_utc() {
        let handler = TimezoneHandler::new("Invalid/Timezone");
        assert_eq!(handler.default_tz(), Tz::UTC);
    }

    // ── local_hour ───────────────────────────────────────────────────────

    #[test]
    fn test_local_hour_utc_is_identity() {
        let handler = TimezoneHandler::new("UTC");
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 21, 30, 0).unwrap();
        assert_eq!(handler.local_hour(dt), 21);
    }

    #[test]
    fn test_local_hour_crosses_zones() {
        // 02:00 UTC on Jan 15 is 21:00 on Jan 14 in New York (EST, UTC-5).
        let handler = TimezoneHandler::new("America/New_York");
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap();
        assert_eq!(handler.local_hour(dt), 21);
    }

    // ── local_date ───────────────────────────────────────────────────────

    #[test]
    fn test_local_date_utc() {
        let handler = TimezoneHandler::new("UTC");
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap();
        assert_eq!(
            handler.local_date(dt),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_local_date_shifts_across_midnight() {
        // 02:00 UTC on Jan 15 is still Jan 14 in New York.
        let handler = TimezoneHandler::new("America/New_York");
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap();
        assert_eq!(
            handler.local_date(dt),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
        );
    }

    // ── get_system_timezone ──────────────────────────────────────────────

    #[test]
    fn test_get_system_timezone_returns_nonempty_string() {
        let tz = get_system_timezone();
        assert!(!tz.is_empty(), "system timezone should not be empty");
    }
}
