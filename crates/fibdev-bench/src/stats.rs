//! Aggregation of repeated runs with z-score outlier rejection.

/// Default z-score cutoff for outlier rejection.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Keep samples whose z-score is strictly below `threshold`.
///
/// With zero spread every sample is kept.
#[must_use]
pub fn outlier_filter(values: &[f64], threshold: f64) -> Vec<f64> {
    let sd = std_dev(values);
    if sd == 0.0 {
        return values.to_vec();
    }
    let m = mean(values);
    values
        .iter()
        .copied()
        .filter(|v| ((v - m) / sd).abs() < threshold)
        .collect()
}

/// Mean after outlier rejection, falling back to the plain mean if the
/// filter rejected everything.
#[must_use]
pub fn filtered_mean(values: &[f64], threshold: f64) -> f64 {
    let kept = outlier_filter(values, threshold);
    if kept.is_empty() {
        mean(values)
    } else {
        mean(&kept)
    }
}

/// Collapse `runs[r][i]` into one filtered mean per column `i`.
///
/// Every run must have the same length.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_runs(runs: &[Vec<u64>], threshold: f64) -> Vec<f64> {
    let Some(width) = runs.first().map(Vec::len) else {
        return Vec::new();
    };
    debug_assert!(runs.iter().all(|r| r.len() == width));

    (0..width)
        .map(|i| {
            let column: Vec<f64> = runs.iter().map(|r| r[i] as f64).collect();
            filtered_mean(&column, threshold)
        })
        .collect()
}
