//! Tone stability scoring
//!
//! Measures how steadily a singer holds pitch, independent of the melody.
//!
//! The contour is split into a local curve (`smooth`, 7-frame average, frame
//! noise removed) and a slow trend (`trend`, 31-frame average of `smooth`,
//! the intended melodic shape). Their difference, the residual, carries the
//! wobble. Scoring the residual rather than the global variance means a
//! smooth phrase is not penalized for moving.
//!
//! # Algorithm
//!
//! 1. `mad` = median absolute deviation of the residual
//! 2. `jitter` = median frame-to-frame move of `smooth`, below the 80th
//!    percentile
//! 3. `instability = 0.65·mad + 0.35·jitter`
//! 4. `score = 100·exp(−2.4·instability)`
//! 5. Discount by coverage, `min(1, voiced / 60)`, since a handful of frames
//!    overstates steadiness

use super::result::finalize_score;
use super::voiced_semitones;
use crate::features::pitch::PitchContour;
use crate::features::smoothing::moving_average;
use crate::features::statistics::{abs_deltas, core_median, median_absolute_deviation};

/// Local contour window in frames
const SMOOTH_WINDOW: usize = 7;

/// Melodic trend window in frames
const TREND_WINDOW: usize = 31;

/// Percentile below which deltas count as jitter
const JITTER_PERCENTILE: f32 = 80.0;

const MAD_WEIGHT: f32 = 0.65;
const JITTER_WEIGHT: f32 = 0.35;

/// Exponential decay rate per semitone of instability
const INSTABILITY_DECAY: f32 = 2.4;

/// Voiced frames needed for full coverage
const FULL_COVERAGE_FRAMES: f32 = 60.0;

/// Stability score in [0, 100]
///
/// Returns 0.0 for fewer than 16 voiced samples.
///
/// # Example
///
/// ```
/// use vocal_scoring::analysis::stability::stability_score;
/// use vocal_scoring::PitchContour;
///
/// // A perfectly held note over enough frames for full coverage
/// let held = PitchContour::new(vec![392.0; 60]);
/// assert_eq!(stability_score(&held), 100.0);
/// ```
pub fn stability_score(contour: &PitchContour) -> f32 {
    let Some(semitones) = voiced_semitones(contour) else {
        log::debug!(
            "Stability skipped: {} frames is below the voiced minimum",
            contour.len()
        );
        return 0.0;
    };

    let smooth = moving_average(&semitones, SMOOTH_WINDOW);
    let trend = moving_average(&smooth, TREND_WINDOW);
    let residual: Vec<f32> = smooth.iter().zip(&trend).map(|(s, t)| s - t).collect();

    let mad = median_absolute_deviation(&residual);
    let jitter = core_median(&abs_deltas(&smooth), JITTER_PERCENTILE);

    let instability = MAD_WEIGHT * mad + JITTER_WEIGHT * jitter;
    let coverage = (semitones.len() as f32 / FULL_COVERAGE_FRAMES).min(1.0);
    let score = 100.0 * (-INSTABILITY_DECAY * instability).exp() * coverage;

    log::debug!(
        "Stability: mad={:.4}, jitter={:.4}, instability={:.4}, coverage={:.2}, score={:.2}",
        mad,
        jitter,
        instability,
        coverage,
        score
    );

    finalize_score(score)
}
