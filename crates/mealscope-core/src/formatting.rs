/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use mealscope_core::formatting::percentage;
///
/// assert!((percentage(4.0, 10.0, 1) - 40.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Format a [0, 1] ratio as a whole-percent string.
///
/// The fractional percent is truncated, not rounded: `0.349` → `"34%"`.
///
/// # Examples
///
/// ```
/// use mealscope_core::formatting::format_percent;
///
/// assert_eq!(format_percent(0.4), "40%");
/// assert_eq!(format_percent(0.0), "0%");
/// assert_eq!(format_percent(1.0), "100%");
/// ```
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0) as u32)
}

/// Format an hour of day (0–23) as a clock label, e.g. `"21:00"`.
///
/// # Examples
///
/// ```
/// use mealscope_core::formatting::format_hour;
///
/// assert_eq!(format_hour(9), "9:00");
/// assert_eq!(format_hour(21), "21:00");
/// ```
pub fn format_hour(hour: u32) -> String {
    format!("{}:00", hour)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
