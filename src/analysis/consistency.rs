//! Reference-free pitch control score
//!
//! Without a reference there is nothing to be "correct" against, so this
//! scores how controlled the contour is instead:
//!
//! 1. Convert to semitones and smooth with a 5-frame moving average
//! 2. **Transition score**: penalize the fraction of frame-to-frame moves
//!    larger than 2.5 semitones (uncontrolled jumps rather than intervals)
//! 3. **Jitter score**: exponential decay of the median small movement,
//!    taken below the 70th percentile so melodic leaps don't count
//! 4. Blend 60% transition, 40% jitter

use super::result::finalize_score;
use super::voiced_semitones;
use crate::features::pitch::PitchContour;
use crate::features::smoothing::moving_average;
use crate::features::statistics::{abs_deltas, core_median};

/// Moving-average window in frames
const SMOOTHING_WINDOW: usize = 5;

/// Frame-to-frame move in semitones above which a move counts as abrupt
const ABRUPT_JUMP_SEMITONES: f32 = 2.5;

/// Transition-score penalty per unit of abrupt-move ratio
const ABRUPT_PENALTY: f32 = 220.0;

/// Percentile below which deltas count as micro-jitter
const JITTER_PERCENTILE: f32 = 70.0;

/// Exponential decay rate of the jitter score per semitone
const JITTER_DECAY: f32 = 2.8;

const TRANSITION_WEIGHT: f32 = 0.6;
const JITTER_WEIGHT: f32 = 0.4;

/// Self-consistency score in [0, 100]
///
/// Returns 0.0 for fewer than 16 voiced samples.
pub fn self_consistency_score(contour: &PitchContour) -> f32 {
    let Some(semitones) = voiced_semitones(contour) else {
        log::debug!(
            "Self-consistency skipped: {} frames is below the voiced minimum",
            contour.len()
        );
        return 0.0;
    };

    let smooth = moving_average(&semitones, SMOOTHING_WINDOW);
    let deltas = abs_deltas(&smooth);
    if deltas.is_empty() {
        return 0.0;
    }

    let abrupt = deltas.iter().filter(|&&d| d > ABRUPT_JUMP_SEMITONES).count();
    let abrupt_ratio = abrupt as f32 / deltas.len() as f32;
    let transition_score = (100.0 - abrupt_ratio * ABRUPT_PENALTY).max(0.0);

    let micro_jitter = core_median(&deltas, JITTER_PERCENTILE);
    let jitter_score = 100.0 * (-JITTER_DECAY * micro_jitter).exp();

    let score = TRANSITION_WEIGHT * transition_score + JITTER_WEIGHT * jitter_score;

    log::debug!(
        "Self-consistency: abrupt_ratio={:.3}, transition={:.2}, micro_jitter={:.4}, jitter={:.2}, score={:.2}",
        abrupt_ratio,
        transition_score,
        micro_jitter,
        jitter_score,
        score
    );

    finalize_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hz for a semitone number (69 = A4)
    fn semitone_hz(semitone: f32) -> f32 {
        440.0 * 2f32.powf((semitone - 69.0) / 12.0)
    }

    #[test]
    fn test_too_few_samples() {
        assert_eq!(self_consistency_score(&PitchContour::default()), 0.0);
        assert_eq!(self_consistency_score(&PitchContour::new(vec![220.0; 15])), 0.0);
    }

    #[test]
    fn test_too_few_voiced_samples() {
        // 20 frames, but only 10 voiced
        let mut values = vec![220.0; 10];
        values.extend(vec![0.0; 10]);
        assert_eq!(self_consistency_score(&PitchContour::new(values)), 0.0);
    }

    #[test]
    fn test_steady_tone_scores_full() {
        // No movement: transition 100, jitter exp(0) = 100
        let contour = PitchContour::new(vec![330.0; 40]);
        assert_eq!(self_consistency_score(&contour), 100.0);
    }

    /// Held scale with a small vibrato and a spike every 17 frames
    fn ornamented_scale(len: usize) -> PitchContour {
        (0..len)
            .map(|i| {
                let spike = if i % 17 == 0 { 5.0 } else { 0.0 };
                let note = 57.0 + 2.0 * ((i / 9) % 5) as f64;
                let semitone = note + 0.4 * (0.9 * i as f64).sin() + spike;
                (440.0 * 2f64.powf((semitone - 69.0) / 12.0)) as f32
            })
            .collect::<Vec<f32>>()
            .into()
    }

    #[test]
    fn test_stepwise_melody_is_not_penalized_as_abrupt() {
        // Whole-tone scale held 24 frames per note: over 70% of smoothed
        // deltas are zero, so micro-jitter is 0 and no move exceeds 2.5
        let values: Vec<f32> = (0..6)
            .flat_map(|step| std::iter::repeat(semitone_hz(60.0 + 2.0 * step as f32)).take(24))
            .collect();
        assert_eq!(self_consistency_score(&PitchContour::new(values)), 100.0);
    }

    #[test]
    fn test_ornamented_scale_scores() {
        for (len, expected) in [
            (16, 89.18),
            (20, 80.2),
            (31, 87.36),
            (45, 88.27),
            (100, 87.15),
        ] {
            assert_eq!(
                self_consistency_score(&ornamented_scale(len)),
                expected,
                "len {}",
                len
            );
        }
    }

    #[test]
    fn test_abrupt_jumps_penalize_transition_score() {
        // 15-semitone leaps every 12 frames: each spreads into 5 smoothed
        // deltas of 3.0, so 15 of 47 deltas are abrupt.
        // transition = 100 - 220 * 15/47, jitter = 100, blend 0.6/0.4
        let values: Vec<f32> = (0..48)
            .map(|i| semitone_hz(if (i / 12) % 2 == 0 { 55.0 } else { 70.0 }))
            .collect();
        assert_eq!(self_consistency_score(&PitchContour::new(values)), 57.87);
    }

    #[test]
    fn test_erratic_contour_scores_low() {
        // Alternating two octaves apart every frame; even after smoothing
        // every move exceeds the jump threshold
        let values: Vec<f32> = (0..40)
            .map(|i| if i % 2 == 0 { 110.0 } else { 440.0 })
            .collect();
        let score = self_consistency_score(&PitchContour::new(values));
        assert!(score < 50.0, "erratic contour should score low, got {}", score);
        assert!(score >= 0.0);
    }
}
