//! Robust statistics shared by the scorers
//!
//! Median, percentile (linear interpolation between closest ranks), median
//! absolute deviation, population standard deviation and Pearson correlation.
//! Empty inputs return 0.0 instead of failing; callers enforce their own
//! minimum sample counts before reaching for these.

use std::cmp::Ordering;

fn sorted_copy(values: &[f32]) -> Vec<f32> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Median of `values` (mean of the two middle values for even lengths)
///
/// Returns 0.0 for empty input.
pub fn median(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted_copy(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
        sorted[mid]
    }
}

/// Percentile of `values`, `percentile` in [0, 100]
///
/// Uses linear interpolation between the two closest ranks, so the 50th
/// percentile equals [`median`]. Out-of-range percentiles are clamped.
/// Returns 0.0 for empty input.
pub fn percentile(values: &[f32], percentile: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted_copy(values);
    let rank = (sorted.len() - 1) as f64 * (percentile.clamp(0.0, 100.0) as f64 / 100.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    let lo = sorted[lower] as f64;
    let hi = sorted[upper] as f64;
    (lo + (hi - lo) * fraction) as f32
}

/// Median absolute deviation from the median
///
/// `MAD = median(|x - median(x)|)`. Returns 0.0 for empty input.
pub fn median_absolute_deviation(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let center = median(values);
    let deviations: Vec<f32> = values.iter().map(|&v| (v - center).abs()).collect();
    median(&deviations)
}

/// Median of the values at or below the given percentile
///
/// Trims the upper tail (interval jumps, octave glitches) before taking the
/// median, so the result tracks the typical small movement. Falls back to
/// the median of all values if the trimmed set is empty. Returns 0.0 for
/// empty input.
pub fn core_median(values: &[f32], cutoff_percentile: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let cutoff = percentile(values, cutoff_percentile);
    let core: Vec<f32> = values.iter().copied().filter(|&v| v <= cutoff).collect();
    if core.is_empty() {
        median(values)
    } else {
        median(&core)
    }
}

/// Absolute differences between consecutive values
///
/// Length is `values.len() - 1`, or 0 for fewer than two values.
pub fn abs_deltas(values: &[f32]) -> Vec<f32> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

/// Arithmetic mean, accumulated in f64. Returns 0.0 for empty input.
pub fn mean(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N). Returns 0.0 for empty input.
pub fn population_std(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let m = mean(values);
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient of two equal-length sequences
///
/// Only the common prefix is used if lengths differ. May return NaN when
/// either sequence is constant; callers are expected to guard against that.
pub fn pearson_correlation(a: &[f32], b: &[f32]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }

    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut cov = 0.0f64;
    let mut var_a = 0.0f64;
    let mut var_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x as f64 - mean_a;
        let dy = y as f64 - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    cov / (var_a * var_b).sqrt()
}
