//! # Vocal Scoring
//!
//! A performance scoring engine for sung recordings. Given a user's
//! performance and, optionally, a reference track, it produces bounded
//! 0-100 scores for pitch accuracy, timing accuracy and tone stability, plus
//! a flag for likely trouble in the upper register.
//!
//! ## Features
//!
//! - **Pitch Accuracy**: Frame-wise match rate against a reference contour,
//!   or a self-consistency score when no reference is available
//! - **Timing Accuracy**: Onset-envelope correlation blended with tempo agreement
//! - **Tone Stability**: Residual wobble around the melodic trend, so smooth
//!   phrases are not penalized for moving
//! - **Graceful Degradation**: A broken reference never fails the request;
//!   the user is scored without it and the metadata says why
//!
//! Decoding and signal primitives (pitch candidates, onset strength, tempo)
//! come from a [`SignalProvider`] supplied by the caller.
//!
//! ## Quick Start
//!
//! ```
//! use vocal_scoring::{score, PitchContour};
//!
//! // Voiced pitch values in Hz, one per analysis frame
//! let reference = PitchContour::new(vec![440.0, 440.0, 440.0]);
//! let user = PitchContour::new(vec![440.0, 460.0, 400.0]);
//!
//! let report = score(&user, Some(&reference), None);
//! assert_eq!(report.pitch_accuracy, 66.67);
//! assert!(report.high_notes_issue);
//! // Timing is neutral without onset data
//! assert_eq!(report.timing_accuracy, 75.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source → Provider (decode, pitch frames, onsets, tempo) → Features → Scorers → ScoreReport
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;

// Re-export main types
pub use analysis::aggregator::{ScoringEngine, NEUTRAL_TIMING_SCORE};
pub use analysis::metadata::ScoringMetadata;
pub use analysis::result::{ScoreReport, ScoringOutcome};
pub use analysis::timing::TimingInputs;
pub use config::{AnalysisMode, ScoringConfig};
pub use error::{ProviderStage, ScoringError};
pub use features::onset::OnsetEnvelope;
pub use features::pitch::reducer::PitchFrames;
pub use features::pitch::strategy::PitchStrategy;
pub use features::pitch::PitchContour;
pub use io::provider::{DecodedAudio, SignalProvider};

/// Score a performance with the default configuration
///
/// # Arguments
///
/// * `user` - Voiced pitch contour of the performance
/// * `reference` - Voiced pitch contour of the reference, if any
/// * `timing` - Onset envelopes and tempos of both tracks, if any
///
/// # Returns
///
/// `ScoreReport` with every score in [0, 100]. Never fails: missing or
/// insufficient data lowers individual scores instead.
pub fn score(
    user: &PitchContour,
    reference: Option<&PitchContour>,
    timing: Option<&TimingInputs>,
) -> ScoreReport {
    ScoringEngine::default().score(user, reference, timing)
}
