//! Timing accuracy scoring
//!
//! Compares the rhythmic fingerprint of a performance with a reference:
//! 70% onset-envelope correlation, 30% tempo agreement.

use super::result::{finalize_score, MAX_SCORE};
use crate::features::onset::correlation::onset_correlation;
use crate::features::onset::OnsetEnvelope;
use serde::{Deserialize, Serialize};

const CORRELATION_WEIGHT: f32 = 0.7;
const TEMPO_WEIGHT: f32 = 0.3;

/// Rhythm measurements of a reference and a user performance
///
/// Both sides must come from the same provider at the same timing sample
/// rate, otherwise envelope frames do not line up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingInputs {
    /// Reference onset-strength envelope
    pub reference_onset: OnsetEnvelope,
    /// User onset-strength envelope
    pub user_onset: OnsetEnvelope,
    /// Reference tempo in BPM (0 = undetected)
    pub reference_tempo: f32,
    /// User tempo in BPM (0 = undetected)
    pub user_tempo: f32,
}

/// Map a correlation in [-1, 1] onto [0, 100]
pub fn correlation_score(correlation: f32) -> f32 {
    (((correlation + 1.0) / 2.0) * 100.0).clamp(0.0, MAX_SCORE)
}

/// Tempo agreement in [0, 100]
///
/// `100 − 100·|user − reference| / reference`, floored at 0. An undetected
/// (non-positive) reference tempo scores 0.
pub fn tempo_score(reference_tempo: f32, user_tempo: f32) -> f32 {
    if reference_tempo.is_nan() || reference_tempo <= 0.0 {
        return 0.0;
    }

    let relative_error = (user_tempo - reference_tempo).abs() / reference_tempo;
    let score = 100.0 - relative_error * 100.0;
    if score.is_finite() {
        score.max(0.0)
    } else {
        0.0
    }
}

/// Timing accuracy in [0, 100]
///
/// # Example
///
/// ```
/// use vocal_scoring::analysis::timing::{timing_accuracy, TimingInputs};
///
/// let envelope: Vec<f32> = (0..64).map(|i| if i % 8 == 0 { 1.0 } else { 0.05 }).collect();
/// let inputs = TimingInputs {
///     reference_onset: envelope.clone().into(),
///     user_onset: envelope.into(),
///     reference_tempo: 120.0,
///     user_tempo: 120.0,
/// };
/// assert_eq!(timing_accuracy(&inputs), 100.0);
/// ```
pub fn timing_accuracy(inputs: &TimingInputs) -> f32 {
    let correlation = onset_correlation(
        inputs.reference_onset.as_slice(),
        inputs.user_onset.as_slice(),
    );
    let corr_score = correlation_score(correlation);
    let tempo = tempo_score(inputs.reference_tempo, inputs.user_tempo);

    let timing = CORRELATION_WEIGHT * corr_score + TEMPO_WEIGHT * tempo;

    log::debug!(
        "Timing: corr={:.4} ({:.2}), tempo {:.1} vs {:.1} BPM ({:.2}), timing={:.2}",
        correlation,
        corr_score,
        inputs.user_tempo,
        inputs.reference_tempo,
        tempo,
        timing
    );

    finalize_score(timing)
}
