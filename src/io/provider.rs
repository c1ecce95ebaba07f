//! Signal Primitive Provider contract
//!
//! Implement [`SignalProvider`] to plug a decoder and pitch/onset/tempo
//! trackers into the engine. Any error a provider returns is fatal to the
//! scoring call that triggered it (except inside the pitch strategy
//! fallback chain) and is never retried by the engine.

use crate::error::{ProviderStage, ScoringError};
use crate::features::pitch::reducer::PitchFrames;
use std::path::Path;

/// Mono PCM audio at a known sample rate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedAudio {
    /// Mono samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Wrap decoded samples
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration in seconds (0.0 for a zero sample rate)
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// External signal primitives consumed by the scoring engine
///
/// Methods take `&self`; a provider that is also `Sync` can serve concurrent
/// scoring calls.
pub trait SignalProvider {
    /// Decode `path` to mono, resampling to `target_sample_rate` when given
    fn decode_and_resample(
        &self,
        path: &Path,
        target_sample_rate: Option<u32>,
    ) -> Result<DecodedAudio, ScoringError>;

    /// Frame x bin pitch candidates with their magnitudes
    fn pitch_frames(
        &self,
        samples: &[f32],
        sample_rate: u32,
        hop_length: usize,
    ) -> Result<PitchFrames, ScoringError>;

    /// One fundamental estimate per frame, non-finite for unvoiced frames
    ///
    /// The default implementation reports the primitive as unsupported, which
    /// makes the direct strategy fall through to the next one.
    fn direct_pitch_contour(
        &self,
        _samples: &[f32],
        _sample_rate: u32,
        _hop_length: usize,
    ) -> Result<Vec<f32>, ScoringError> {
        Err(ScoringError::unsupported(ProviderStage::DirectPitch))
    }

    /// Non-negative onset strength per analysis frame
    fn onset_envelope(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>, ScoringError>;

    /// Global tempo in BPM; 0.0 when none is detected
    fn tempo(&self, samples: &[f32], sample_rate: u32) -> Result<f32, ScoringError>;

    /// Whether `path` can be decoded at all
    ///
    /// An unavailable reference is treated as absent rather than as an error.
    fn is_available(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_seconds() {
        let audio = DecodedAudio::new(vec![0.0; 24_000], 16_000);
        assert_eq!(audio.duration_seconds(), 1.5);
        assert_eq!(DecodedAudio::new(vec![0.0; 10], 0).duration_seconds(), 0.0);
    }
}
