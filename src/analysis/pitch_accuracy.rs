//! Reference-based pitch accuracy
//!
//! Fraction of index-aligned frames where the user's pitch lies within a
//! fixed Hz tolerance of the reference.

use super::result::round_to_hundredths;
use crate::features::pitch::PitchContour;

/// Default match tolerance in Hz
pub const DEFAULT_TOLERANCE_HZ: f32 = 20.0;

/// Percentage of frames matching the reference within `tolerance_hz`
///
/// Both contours are truncated to their common length; alignment is by
/// index, not by time. Returns 0.0 if either contour is empty.
///
/// # Example
///
/// ```
/// use vocal_scoring::analysis::pitch_accuracy::pitch_accuracy;
/// use vocal_scoring::PitchContour;
///
/// let reference = PitchContour::new(vec![440.0, 440.0, 440.0]);
/// let user = PitchContour::new(vec![440.0, 460.0, 400.0]);
/// assert_eq!(pitch_accuracy(&reference, &user, 20.0), 66.67);
/// ```
pub fn pitch_accuracy(reference: &PitchContour, user: &PitchContour, tolerance_hz: f32) -> f32 {
    if reference.is_empty() || user.is_empty() {
        return 0.0;
    }

    let length = reference.len().min(user.len());
    let matches = reference.as_slice()[..length]
        .iter()
        .zip(&user.as_slice()[..length])
        .filter(|&(&r, &u)| (r - u).abs() <= tolerance_hz)
        .count();

    let accuracy = round_to_hundredths(matches as f32 / length as f32 * 100.0);
    log::debug!(
        "Pitch accuracy: {}/{} frames within {:.1} Hz = {:.2}",
        matches,
        length,
        tolerance_hz,
        accuracy
    );
    accuracy
}
