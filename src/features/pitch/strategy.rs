//! Ordered pitch extraction strategies
//!
//! Every strategy shares one contract, `(samples, sample_rate, hop_length) →
//! contour`, and delegates the tracking itself to a
//! [`SignalProvider`]. [`extract_contour`] tries the configured strategies in
//! order: a provider failure, or an empty contour, moves on to the next
//! strategy without surfacing an error. Only the last strategy's failure is
//! returned to the caller.
//!
//! List order is the only precedence rule.

use super::reducer::{reduce_direct, reduce_peak_magnitude};
use super::PitchContour;
use crate::error::ScoringError;
use crate::io::provider::SignalProvider;
use serde::{Deserialize, Serialize};

/// A pitch extraction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchStrategy {
    /// Provider's per-frame fundamental estimate, reduced by [`reduce_direct`]
    ///
    /// Providers typically back this with a probabilistic tracker, which may
    /// not be bit-for-bit reproducible across runs. Scores computed from a
    /// contour obtained this way inherit that variation.
    DirectF0,

    /// Provider's frame x bin candidates, reduced by [`reduce_peak_magnitude`]
    ///
    /// Deterministic for a deterministic provider.
    PeakMagnitude,
}

impl PitchStrategy {
    /// Short name for logs and metadata
    pub fn name(&self) -> &'static str {
        match self {
            PitchStrategy::DirectF0 => "direct_f0",
            PitchStrategy::PeakMagnitude => "peak_magnitude",
        }
    }

    /// Run this strategy against `provider`
    ///
    /// # Errors
    ///
    /// Propagates provider failures and malformed provider output.
    pub fn extract<P: SignalProvider + ?Sized>(
        &self,
        provider: &P,
        samples: &[f32],
        sample_rate: u32,
        hop_length: usize,
    ) -> Result<PitchContour, ScoringError> {
        match self {
            PitchStrategy::DirectF0 => {
                let f0 = provider.direct_pitch_contour(samples, sample_rate, hop_length)?;
                Ok(reduce_direct(&f0))
            }
            PitchStrategy::PeakMagnitude => {
                let frames = provider.pitch_frames(samples, sample_rate, hop_length)?;
                Ok(reduce_peak_magnitude(&frames))
            }
        }
    }
}

/// Contour together with the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContour {
    /// Voiced-only contour
    pub contour: PitchContour,
    /// Strategy that produced `contour`
    pub strategy: PitchStrategy,
}

/// Extract a contour, trying `strategies` in order
///
/// A strategy that fails, or yields an empty contour while another strategy
/// remains, is skipped with a warning. The last strategy's result is returned
/// as-is, including an empty contour.
///
/// # Errors
///
/// Returns the last strategy's error if it fails, or `Config` if
/// `strategies` is empty.
pub fn extract_contour<P: SignalProvider + ?Sized>(
    provider: &P,
    strategies: &[PitchStrategy],
    samples: &[f32],
    sample_rate: u32,
    hop_length: usize,
) -> Result<ExtractedContour, ScoringError> {
    let Some((last, preferred)) = strategies.split_last() else {
        return Err(ScoringError::Config(
            "no pitch strategies configured".to_string(),
        ));
    };

    for &strategy in preferred {
        match strategy.extract(provider, samples, sample_rate, hop_length) {
            Ok(contour) if !contour.is_empty() => {
                log::debug!(
                    "Pitch strategy {} produced {} voiced frames",
                    strategy.name(),
                    contour.len()
                );
                return Ok(ExtractedContour { contour, strategy });
            }
            Ok(_) => {
                log::debug!(
                    "Pitch strategy {} produced no voiced frames, falling back",
                    strategy.name()
                );
            }
            Err(err) => {
                log::warn!("Pitch strategy {} failed, falling back: {}", strategy.name(), err);
            }
        }
    }

    let contour = last.extract(provider, samples, sample_rate, hop_length)?;
    log::debug!(
        "Pitch strategy {} produced {} voiced frames",
        last.name(),
        contour.len()
    );
    Ok(ExtractedContour {
        contour,
        strategy: *last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderStage;
    use crate::features::pitch::reducer::PitchFrames;
    use crate::io::provider::DecodedAudio;
    use std::cell::Cell;
    use std::path::Path;

    /// Provider whose direct path behaviour is selectable
    struct StubProvider {
        direct: Option<Vec<f32>>,
        frames_fail: bool,
        direct_calls: Cell<usize>,
    }

    impl StubProvider {
        fn new(direct: Option<Vec<f32>>) -> Self {
            Self {
                direct,
                frames_fail: false,
                direct_calls: Cell::new(0),
            }
        }
    }

    impl SignalProvider for StubProvider {
        fn decode_and_resample(
            &self,
            _path: &Path,
            _target_sample_rate: Option<u32>,
        ) -> Result<DecodedAudio, ScoringError> {
            Err(ScoringError::unsupported(ProviderStage::Decode))
        }

        fn pitch_frames(
            &self,
            _samples: &[f32],
            _sample_rate: u32,
            _hop_length: usize,
        ) -> Result<PitchFrames, ScoringError> {
            if self.frames_fail {
                return Err(ScoringError::provider(ProviderStage::PitchFrames, "boom"));
            }
            PitchFrames::new(
                vec![vec![330.0, 660.0], vec![0.0, 0.0]],
                vec![vec![1.0, 0.5], vec![0.0, 0.0]],
            )
        }

        fn direct_pitch_contour(
            &self,
            _samples: &[f32],
            _sample_rate: u32,
            _hop_length: usize,
        ) -> Result<Vec<f32>, ScoringError> {
            self.direct_calls.set(self.direct_calls.get() + 1);
            self.direct
                .clone()
                .ok_or_else(|| ScoringError::provider(ProviderStage::DirectPitch, "tracker crashed"))
        }

        fn onset_envelope(&self, _samples: &[f32], _sample_rate: u32) -> Result<Vec<f32>, ScoringError> {
            Err(ScoringError::unsupported(ProviderStage::OnsetEnvelope))
        }

        fn tempo(&self, _samples: &[f32], _sample_rate: u32) -> Result<f32, ScoringError> {
            Err(ScoringError::unsupported(ProviderStage::Tempo))
        }
    }

    const BOTH: [PitchStrategy; 2] = [PitchStrategy::DirectF0, PitchStrategy::PeakMagnitude];

    #[test]
    fn test_direct_preferred_when_it_succeeds() {
        let provider = StubProvider::new(Some(vec![f32::NAN, 220.0, 221.0]));
        let extracted = extract_contour(&provider, &BOTH, &[0.0; 16], 16_000, 256).unwrap();

        assert_eq!(extracted.strategy, PitchStrategy::DirectF0);
        assert_eq!(extracted.contour.as_slice(), &[220.0, 221.0]);
    }

    #[test]
    fn test_falls_back_on_provider_failure() {
        let provider = StubProvider::new(None);
        let extracted = extract_contour(&provider, &BOTH, &[0.0; 16], 16_000, 256).unwrap();

        assert_eq!(provider.direct_calls.get(), 1);
        assert_eq!(extracted.strategy, PitchStrategy::PeakMagnitude);
        assert_eq!(extracted.contour.as_slice(), &[330.0]);
    }

    #[test]
    fn test_falls_back_on_empty_contour() {
        let provider = StubProvider::new(Some(vec![f32::NAN; 8]));
        let extracted = extract_contour(&provider, &BOTH, &[0.0; 16], 16_000, 256).unwrap();
        assert_eq!(extracted.strategy, PitchStrategy::PeakMagnitude);
    }

    #[test]
    fn test_default_order_skips_direct() {
        let provider = StubProvider::new(Some(vec![220.0]));
        let extracted = extract_contour(
            &provider,
            &[PitchStrategy::PeakMagnitude],
            &[0.0; 16],
            16_000,
            256,
        )
        .unwrap();

        assert_eq!(provider.direct_calls.get(), 0);
        assert_eq!(extracted.strategy, PitchStrategy::PeakMagnitude);
    }

    #[test]
    fn test_last_strategy_failure_is_surfaced() {
        let mut provider = StubProvider::new(None);
        provider.frames_fail = true;

        let err = extract_contour(&provider, &BOTH, &[0.0; 16], 16_000, 256).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Provider {
                stage: ProviderStage::PitchFrames,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_strategy_list() {
        let provider = StubProvider::new(None);
        assert!(matches!(
            extract_contour(&provider, &[], &[], 16_000, 256),
            Err(ScoringError::Config(_))
        ));
    }
}
