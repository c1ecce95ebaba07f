//! Scoring metadata structures

use crate::features::pitch::strategy::PitchStrategy;
use serde::{Deserialize, Serialize};

/// How a [`ScoreReport`](super::result::ScoreReport) was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringMetadata {
    /// Algorithm version
    pub algorithm_version: String,

    /// A reference track contributed pitch and timing scores
    pub reference_used: bool,

    /// Why a supplied reference was not used, if it was not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_warning: Option<String>,

    /// Strategy that produced the user contour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_strategy: Option<PitchStrategy>,

    /// Pitch-tracking hop length in samples
    pub hop_length: usize,

    /// Voiced frames in the user contour
    pub user_voiced_frames: usize,

    /// Voiced frames in the reference contour, when one was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_voiced_frames: Option<usize>,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,
}

impl Default for ScoringMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            reference_used: false,
            reference_warning: None,
            pitch_strategy: None,
            hop_length: 0,
            user_voiced_frames: 0,
            reference_voiced_frames: None,
            processing_time_ms: 0.0,
        }
    }
}
