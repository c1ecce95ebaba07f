//! Score aggregation
//!
//! [`ScoringEngine`] combines the individual scorers into one
//! [`ScoreReport`], choosing between the reference and reference-free paths:
//!
//! | | pitch accuracy | timing accuracy |
//! |---|---|---|
//! | reference | match rate against reference contour | onset correlation + tempo |
//! | no reference | self-consistency | neutral 75.0 |
//!
//! Stability is always computed from the user contour alone.
//!
//! # Determinism
//!
//! Scoring is a pure function of its inputs. Identical contours, envelopes
//! and tempos always give an identical report. When sources are scored
//! through a provider with [`PitchStrategy::DirectF0`] enabled, the
//! provider's tracker may itself vary from run to run, and that variation
//! flows into the scores; the engine does not try to mask it.
//!
//! [`PitchStrategy::DirectF0`]: crate::features::pitch::strategy::PitchStrategy::DirectF0

use super::consistency::self_consistency_score;
use super::metadata::ScoringMetadata;
use super::pitch_accuracy::pitch_accuracy;
use super::result::{ScoreReport, ScoringOutcome};
use super::stability::stability_score;
use super::timing::{timing_accuracy, TimingInputs};
use crate::config::{AnalysisMode, ScoringConfig};
use crate::error::ScoringError;
use crate::features::onset::OnsetEnvelope;
use crate::features::pitch::strategy::{extract_contour, ExtractedContour};
use crate::features::pitch::PitchContour;
use crate::io::loader::load_source;
use crate::io::provider::{DecodedAudio, SignalProvider};
use std::borrow::Cow;
use std::path::Path;
use std::time::Instant;

/// Timing accuracy reported when there is no reference to compare against
///
/// A fixed policy value, not a measurement.
pub const NEUTRAL_TIMING_SCORE: f32 = 75.0;

/// Stateless scoring engine
///
/// Holds only its validated configuration, so one engine can be shared
/// across threads and calls never influence each other. Every call is
/// CPU-bound and runs to completion; callers that need a deadline should run
/// it on a worker pool and discard late results.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

/// Reference contour and rhythm measurements for one comparison
struct ReferenceAnalysis {
    contour: PitchContour,
    timing: TimingInputs,
}

impl ScoringEngine {
    /// Create an engine from `config`
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration fails validation.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    /// The validated configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a user contour, optionally against a reference
    ///
    /// - `reference` present: pitch accuracy against it; absent:
    ///   self-consistency
    /// - `timing` present: measured timing accuracy; absent:
    ///   [`NEUTRAL_TIMING_SCORE`]
    ///
    /// Never fails: insufficient data degrades individual scores to 0.0.
    ///
    /// # Example
    ///
    /// ```
    /// use vocal_scoring::{PitchContour, ScoringEngine};
    ///
    /// let engine = ScoringEngine::default();
    /// let user = PitchContour::new(vec![220.0; 80]);
    ///
    /// let report = engine.score(&user, None, None);
    /// assert_eq!(report.timing_accuracy, 75.0);
    /// assert_eq!(report.stability_score, 100.0);
    /// ```
    pub fn score(
        &self,
        user: &PitchContour,
        reference: Option<&PitchContour>,
        timing: Option<&TimingInputs>,
    ) -> ScoreReport {
        let stability = stability_score(user);

        let pitch = match reference {
            Some(reference) => pitch_accuracy(reference, user, self.config.pitch_tolerance_hz),
            None => self_consistency_score(user),
        };

        let timing = match timing {
            Some(inputs) => timing_accuracy(inputs),
            None => NEUTRAL_TIMING_SCORE,
        };

        let report = ScoreReport::new(pitch, timing, stability);
        log::debug!(
            "Score report: pitch={:.2}, timing={:.2}, stability={:.2}, high_notes_issue={}",
            report.pitch_accuracy,
            report.timing_accuracy,
            report.stability_score,
            report.high_notes_issue
        );
        report
    }

    /// Score a user recording, optionally against a reference recording
    ///
    /// Decodes and measures both sources through `provider`. A reference that
    /// is unavailable, too long, or fails anywhere in its analysis is dropped
    /// with a warning in the returned metadata and the user is scored without
    /// it.
    ///
    /// # Errors
    ///
    /// Failures on the user's side (decode, duration limit, pitch
    /// extraction) are returned as-is; they are fatal to this call.
    pub fn score_sources<P: SignalProvider + ?Sized>(
        &self,
        provider: &P,
        user: &Path,
        reference: Option<&Path>,
        mode: AnalysisMode,
    ) -> Result<ScoringOutcome, ScoringError> {
        let start_time = Instant::now();
        let hop_length = self.config.hop_length_for(mode);

        log::debug!(
            "Scoring {} ({:?} mode, hop {}), reference: {:?}",
            user.display(),
            mode,
            hop_length,
            reference.map(|path| path.display().to_string())
        );

        let user_audio = load_source(
            provider,
            user,
            self.config.analysis_sample_rate,
            self.config.max_audio_seconds,
            "User",
        )?;
        let ExtractedContour {
            contour: user_contour,
            strategy,
        } = self.extract(provider, &user_audio, hop_length)?;

        let mut metadata = ScoringMetadata {
            pitch_strategy: Some(strategy),
            hop_length,
            user_voiced_frames: user_contour.len(),
            ..ScoringMetadata::default()
        };

        let reference_analysis = match reference {
            None => None,
            Some(path) if !provider.is_available(path) => {
                log::warn!("Reference {} unavailable, scoring without it", path.display());
                metadata.reference_warning = Some("Reference track unavailable.".to_string());
                None
            }
            Some(path) => match self.analyze_reference(provider, path, user, &user_audio, hop_length) {
                Ok(analysis) => Some(analysis),
                Err(err) => {
                    log::warn!(
                        "Reference comparison failed, scoring without reference: {}",
                        err
                    );
                    metadata.reference_warning = Some(err.to_string());
                    None
                }
            },
        };

        let report = match &reference_analysis {
            Some(analysis) => {
                metadata.reference_used = true;
                metadata.reference_voiced_frames = Some(analysis.contour.len());
                self.score(&user_contour, Some(&analysis.contour), Some(&analysis.timing))
            }
            None => self.score(&user_contour, None, None),
        };

        metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

        Ok(ScoringOutcome { report, metadata })
    }

    fn extract<P: SignalProvider + ?Sized>(
        &self,
        provider: &P,
        audio: &DecodedAudio,
        hop_length: usize,
    ) -> Result<ExtractedContour, ScoringError> {
        extract_contour(
            provider,
            &self.config.pitch_strategies,
            &audio.samples,
            audio.sample_rate,
            hop_length,
        )
    }

    fn analyze_reference<P: SignalProvider + ?Sized>(
        &self,
        provider: &P,
        reference: &Path,
        user: &Path,
        user_audio: &DecodedAudio,
        hop_length: usize,
    ) -> Result<ReferenceAnalysis, ScoringError> {
        let reference_audio = load_source(
            provider,
            reference,
            self.config.analysis_sample_rate,
            self.config.max_audio_seconds,
            "Reference",
        )?;
        let contour = self.extract(provider, &reference_audio, hop_length)?.contour;

        // Onsets and tempo are measured at the timing rate; reuse the pitch
        // decode when the two rates agree
        let (reference_timing, user_timing): (Cow<'_, DecodedAudio>, Cow<'_, DecodedAudio>) =
            if self.config.timing_sample_rate == self.config.analysis_sample_rate {
                (Cow::Borrowed(&reference_audio), Cow::Borrowed(user_audio))
            } else {
                let rate = self.config.timing_sample_rate;
                (
                    Cow::Owned(load_source(provider, reference, rate, None, "Reference")?),
                    Cow::Owned(load_source(provider, user, rate, None, "User")?),
                )
            };

        let timing = TimingInputs {
            reference_onset: OnsetEnvelope::new(
                provider.onset_envelope(&reference_timing.samples, reference_timing.sample_rate)?,
            ),
            user_onset: OnsetEnvelope::new(
                provider.onset_envelope(&user_timing.samples, user_timing.sample_rate)?,
            ),
            reference_tempo: provider.tempo(&reference_timing.samples, reference_timing.sample_rate)?,
            user_tempo: provider.tempo(&user_timing.samples, user_timing.sample_rate)?,
        };

        log::debug!(
            "Reference analysis: {} voiced frames, {} / {} onset frames, tempo {:.1} / {:.1} BPM",
            contour.len(),
            timing.reference_onset.len(),
            timing.user_onset.len(),
            timing.reference_tempo,
            timing.user_tempo
        );

        Ok(ReferenceAnalysis { contour, timing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semitone_hz(semitone: f32) -> f32 {
        440.0 * 2f32.powf((semitone - 69.0) / 12.0)
    }

    fn melody() -> PitchContour {
        (0..8)
            .flat_map(|step| std::iter::repeat(semitone_hz(62.0 + step as f32)).take(10))
            .collect::<Vec<f32>>()
            .into()
    }

    fn pulse_envelope(len: usize, period: usize) -> OnsetEnvelope {
        (0..len)
            .map(|i| if i % period == 0 { 1.0 } else { 0.1 })
            .collect::<Vec<f32>>()
            .into()
    }

    #[test]
    fn test_no_reference_uses_neutral_timing() {
        let engine = ScoringEngine::default();
        for user in [PitchContour::default(), PitchContour::new(vec![300.0; 5]), melody()] {
            let report = engine.score(&user, None, None);
            assert_eq!(report.timing_accuracy, NEUTRAL_TIMING_SCORE);
        }
    }

    #[test]
    fn test_no_reference_uses_self_consistency() {
        let engine = ScoringEngine::default();
        let user = melody();
        let report = engine.score(&user, None, None);
        assert_eq!(report.pitch_accuracy, self_consistency_score(&user));
        assert_eq!(report.stability_score, stability_score(&user));
    }

    #[test]
    fn test_with_reference() {
        let engine = ScoringEngine::default();
        let user = melody();
        let envelope = pulse_envelope(120, 6);
        let timing = TimingInputs {
            reference_onset: envelope.clone(),
            user_onset: envelope,
            reference_tempo: 110.0,
            user_tempo: 110.0,
        };

        let report = engine.score(&user, Some(&user), Some(&timing));
        assert_eq!(report.pitch_accuracy, 100.0);
        assert_eq!(report.timing_accuracy, 100.0);
        assert!(!report.high_notes_issue);
    }

    #[test]
    fn test_reference_without_timing_keeps_neutral_timing() {
        let engine = ScoringEngine::default();
        let user = melody();
        let report = engine.score(&user, Some(&user), None);
        assert_eq!(report.pitch_accuracy, 100.0);
        assert_eq!(report.timing_accuracy, NEUTRAL_TIMING_SCORE);
    }

    #[test]
    fn test_high_notes_flag_follows_pitch_accuracy() {
        let engine = ScoringEngine::default();
        let reference = PitchContour::new(vec![440.0; 10]);

        // 7 of 10 frames match: 70%
        let mut values = vec![440.0; 7];
        values.extend(vec![520.0; 3]);
        let report = engine.score(&PitchContour::new(values), Some(&reference), None);
        assert_eq!(report.pitch_accuracy, 70.0);
        assert!(report.high_notes_issue);

        // 8 of 10: exactly 80%, not flagged
        let mut values = vec![440.0; 8];
        values.extend(vec![520.0; 2]);
        let report = engine.score(&PitchContour::new(values), Some(&reference), None);
        assert_eq!(report.pitch_accuracy, 80.0);
        assert!(!report.high_notes_issue);
    }

    #[test]
    fn test_tolerance_comes_from_config() {
        let strict = ScoringEngine::new(ScoringConfig {
            pitch_tolerance_hz: 5.0,
            ..ScoringConfig::default()
        })
        .unwrap();

        let reference = PitchContour::new(vec![440.0; 4]);
        let user = PitchContour::new(vec![450.0; 4]);
        assert_eq!(strict.score(&user, Some(&reference), None).pitch_accuracy, 0.0);
        assert_eq!(
            ScoringEngine::default()
                .score(&user, Some(&reference), None)
                .pitch_accuracy,
            100.0
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScoringConfig {
            pitch_strategies: vec![],
            ..ScoringConfig::default()
        };
        assert!(ScoringEngine::new(config).is_err());
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoringEngine>();
    }

    #[test]
    fn test_deterministic() {
        let engine = ScoringEngine::default();
        let user = melody();
        let first = engine.score(&user, None, None);
        let second = engine.score(&user, None, None);
        assert_eq!(first, second);
    }
}
