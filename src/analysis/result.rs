//! Scoring result types

use super::metadata::ScoringMetadata;
use serde::{Deserialize, Serialize};

/// Pitch accuracy below this raises [`ScoreReport::high_notes_issue`]
pub const HIGH_NOTES_THRESHOLD: f32 = 80.0;

/// Upper bound of every score
pub const MAX_SCORE: f32 = 100.0;

/// Clamp a score to [0, 100] and round it to 2 decimals
///
/// NaN maps to 0.0 and infinities to the nearest bound, so no non-finite
/// value ever leaves the engine.
///
/// # Example
///
/// ```
/// use vocal_scoring::analysis::result::finalize_score;
///
/// assert_eq!(finalize_score(66.666_664), 66.67);
/// assert_eq!(finalize_score(-3.0), 0.0);
/// assert_eq!(finalize_score(f32::NAN), 0.0);
/// assert_eq!(finalize_score(f32::INFINITY), 100.0);
/// ```
pub fn finalize_score(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    round_to_hundredths(value.clamp(0.0, MAX_SCORE))
}

/// Round to 2 decimals
pub fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Scores for one performance
///
/// Every numeric field is in [0, 100] with at most 2 decimals, and
/// `high_notes_issue` is exactly `pitch_accuracy < 80.0`. Use
/// [`ScoreReport::new`] to uphold both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Reference match percentage, or self-consistency without a reference
    pub pitch_accuracy: f32,

    /// Rhythmic agreement with the reference; neutral 75.0 without one
    pub timing_accuracy: f32,

    /// Sustained-tone steadiness
    pub stability_score: f32,

    /// Pitch accuracy is below [`HIGH_NOTES_THRESHOLD`]
    pub high_notes_issue: bool,
}

impl ScoreReport {
    /// Build a report from raw scores, clamping, rounding and flagging
    pub fn new(pitch_accuracy: f32, timing_accuracy: f32, stability_score: f32) -> Self {
        let pitch_accuracy = finalize_score(pitch_accuracy);
        Self {
            pitch_accuracy,
            timing_accuracy: finalize_score(timing_accuracy),
            stability_score: finalize_score(stability_score),
            high_notes_issue: pitch_accuracy < HIGH_NOTES_THRESHOLD,
        }
    }
}

/// Report plus how it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    /// The scores
    pub report: ScoreReport,

    /// Provenance of the scores
    pub metadata: ScoringMetadata,
}
