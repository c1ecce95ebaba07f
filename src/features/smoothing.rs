//! Temporal contour smoothing

/// Smallest effective moving-average window
pub const MIN_WINDOW: usize = 3;

/// Moving average with edge-replicated boundaries
///
/// The window is forced to the next odd value that is at least
/// [`MIN_WINDOW`]. Inputs shorter than the window are returned unsmoothed.
/// Otherwise both ends are padded with `window / 2` copies of the edge value
/// and a uniform average is taken, so the output has the same length as the
/// input and no trimmed ends.
///
/// Each window is summed in f64, which keeps the mean of equal f32 values
/// exact: a constant sequence comes back unchanged for every window.
///
/// # Example
///
/// ```
/// use vocal_scoring::features::smoothing::moving_average;
///
/// let smoothed = moving_average(&[0.0, 0.0, 3.0, 0.0, 0.0], 3);
/// assert_eq!(smoothed, vec![0.0, 1.0, 1.0, 1.0, 0.0]);
/// ```
pub fn moving_average(values: &[f32], window: usize) -> Vec<f32> {
    let window = effective_window(window);
    if values.len() < window {
        return values.to_vec();
    }

    let pad = window / 2;
    let first = values[0];
    let last = values[values.len() - 1];

    let padded: Vec<f32> = std::iter::repeat(first)
        .take(pad)
        .chain(values.iter().copied())
        .chain(std::iter::repeat(last).take(pad))
        .collect();

    let smoothed: Vec<f32> = padded
        .windows(window)
        .map(|w| (w.iter().map(|&v| v as f64).sum::<f64>() / window as f64) as f32)
        .collect();

    debug_assert_eq!(smoothed.len(), values.len());
    smoothed
}

/// Window actually applied by [`moving_average`] for a requested size
pub fn effective_window(window: usize) -> usize {
    let window = window.max(MIN_WINDOW);
    if window % 2 == 0 {
        window + 1
    } else {
        window
    }
}
