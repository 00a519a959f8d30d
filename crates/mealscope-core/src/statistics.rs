// ── Mean ──────────────────────────────────────────────────────────────────────

/// Arithmetic mean of a slice.
///
/// Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ── Population variance ───────────────────────────────────────────────────────

/// Population variance of a slice: the mean of squared deviations from the
/// mean, dividing by `n` (not `n - 1`).
///
/// Returns `0.0` for an empty slice. A single-element slice trivially has
/// variance `0.0`.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
