//! Scoring and result aggregation modules
//!
//! Turns contours and envelopes into bounded scores:
//! - Pitch accuracy against a reference
//! - Self-consistency without a reference
//! - Tone stability
//! - Timing accuracy
//! - Aggregation into a [`ScoreReport`](result::ScoreReport)

pub mod aggregator;
pub mod consistency;
pub mod metadata;
pub mod pitch_accuracy;
pub mod result;
pub mod stability;
pub mod timing;

use crate::features::pitch::{contour_to_semitones, PitchContour};

/// Fewest voiced samples the contour-shape scorers will look at
pub const MIN_VOICED_SAMPLES: usize = 16;

/// Voiced part of `contour` on the semitone scale, or `None` if there are
/// fewer than [`MIN_VOICED_SAMPLES`] frames before or after dropping
/// non-positive values
pub(crate) fn voiced_semitones(contour: &PitchContour) -> Option<Vec<f32>> {
    if contour.len() < MIN_VOICED_SAMPLES {
        return None;
    }

    let voiced = contour.voiced();
    if voiced.len() < MIN_VOICED_SAMPLES {
        return None;
    }

    Some(contour_to_semitones(&voiced))
}
