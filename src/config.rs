//! Configuration parameters for performance scoring
//!
//! Every tunable that influences a score is fixed here when the
//! [`ScoringEngine`](crate::ScoringEngine) is constructed. The engine never
//! consults process-wide state, so two engines built from equal configs score
//! identically.

use crate::error::ScoringError;
use crate::features::pitch::strategy::PitchStrategy;
use serde::{Deserialize, Serialize};

/// Lowest sample rate accepted for analysis or timing decode
pub const MIN_SAMPLE_RATE: u32 = 8000;

/// Lowest hop length accepted for pitch tracking
pub const MIN_HOP_LENGTH: usize = 256;

const ENV_PREFIX: &str = "VOCAL_SCORING_";

/// Analysis speed/resolution trade-off for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Pitch tracking at [`ScoringConfig::hop_length`]
    #[default]
    Standard,
    /// Pitch tracking at the coarser [`ScoringConfig::fast_hop_length`]
    Fast,
}

/// Scoring configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Sample rate requested from the provider for pitch tracking (default: 16000)
    pub analysis_sample_rate: u32,

    /// Sample rate requested from the provider for onset/tempo analysis (default: 16000)
    pub timing_sample_rate: u32,

    /// Pitch-tracking hop length in samples (default: 768)
    pub hop_length: usize,

    /// Hop length used in [`AnalysisMode::Fast`] (default: 1024)
    /// Never smaller than `hop_length` after validation
    pub fast_hop_length: usize,

    /// Maximum |reference - user| in Hz counted as a pitch match (default: 20.0)
    pub pitch_tolerance_hz: f32,

    /// Pitch extraction strategies, tried in order (default: `[PeakMagnitude]`)
    pub pitch_strategies: Vec<PitchStrategy>,

    /// Longest decoded source accepted, in seconds (default: 60.0)
    /// `None` disables the guard
    pub max_audio_seconds: Option<f32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            analysis_sample_rate: 16_000,
            timing_sample_rate: 16_000,
            hop_length: 768,
            fast_hop_length: 1024,
            pitch_tolerance_hz: 20.0,
            pitch_strategies: vec![PitchStrategy::PeakMagnitude],
            max_audio_seconds: Some(60.0),
        }
    }
}

impl ScoringConfig {
    /// Enable or disable the direct fundamental-frequency strategy
    ///
    /// When enabled it is tried first and the peak-magnitude reducer becomes
    /// the fallback.
    pub fn with_direct_pitch(mut self, enabled: bool) -> Self {
        self.pitch_strategies.retain(|s| *s != PitchStrategy::DirectF0);
        if enabled {
            self.pitch_strategies.insert(0, PitchStrategy::DirectF0);
        }
        self
    }

    /// Hop length to use for `mode`
    pub fn hop_length_for(&self, mode: AnalysisMode) -> usize {
        match mode {
            AnalysisMode::Standard => self.hop_length,
            AnalysisMode::Fast => self.fast_hop_length,
        }
    }

    /// Apply floors and reject unusable values
    ///
    /// Sample rates below [`MIN_SAMPLE_RATE`] and hop lengths below
    /// [`MIN_HOP_LENGTH`] are raised rather than rejected.
    pub fn validated(mut self) -> Result<Self, ScoringError> {
        self.analysis_sample_rate = self.analysis_sample_rate.max(MIN_SAMPLE_RATE);
        self.timing_sample_rate = self.timing_sample_rate.max(MIN_SAMPLE_RATE);
        self.hop_length = self.hop_length.max(MIN_HOP_LENGTH);
        self.fast_hop_length = self.fast_hop_length.max(self.hop_length);

        if !(self.pitch_tolerance_hz.is_finite() && self.pitch_tolerance_hz > 0.0) {
            return Err(ScoringError::Config(format!(
                "pitch tolerance must be a positive number of Hz, got {}",
                self.pitch_tolerance_hz
            )));
        }

        if self.pitch_strategies.is_empty() {
            return Err(ScoringError::Config(
                "at least one pitch strategy is required".to_string(),
            ));
        }

        if let Some(limit) = self.max_audio_seconds {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ScoringError::Config(format!(
                    "max audio duration must be positive, got {}",
                    limit
                )));
            }
        }

        Ok(self)
    }

    /// Build a configuration from `VOCAL_SCORING_*` environment variables
    ///
    /// The environment is read once, here. Unset or unparsable variables keep
    /// their defaults.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `VOCAL_SCORING_USE_DIRECT_PITCH` | `with_direct_pitch` (`1`/`true`/`yes`/`on`) |
    /// | `VOCAL_SCORING_ANALYSIS_SAMPLE_RATE` | `analysis_sample_rate` |
    /// | `VOCAL_SCORING_TIMING_SAMPLE_RATE` | `timing_sample_rate` |
    /// | `VOCAL_SCORING_HOP_LENGTH` | `hop_length` |
    /// | `VOCAL_SCORING_FAST_HOP_LENGTH` | `fast_hop_length` |
    /// | `VOCAL_SCORING_MAX_AUDIO_SECONDS` | `max_audio_seconds` (`0` or less disables the guard) |
    pub fn from_env() -> Result<Self, ScoringError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoringError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let defaults = Self::default();

        let use_direct = var("USE_DIRECT_PITCH")
            .map(|raw| {
                matches!(
                    raw.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(false);

        let max_audio_seconds = parse_or(
            var("MAX_AUDIO_SECONDS"),
            defaults.max_audio_seconds.unwrap_or(0.0),
        );

        let config = Self {
            analysis_sample_rate: parse_or(
                var("ANALYSIS_SAMPLE_RATE"),
                defaults.analysis_sample_rate,
            ),
            timing_sample_rate: parse_or(var("TIMING_SAMPLE_RATE"), defaults.timing_sample_rate),
            hop_length: parse_or(var("HOP_LENGTH"), defaults.hop_length),
            fast_hop_length: parse_or(var("FAST_HOP_LENGTH"), defaults.fast_hop_length),
            max_audio_seconds: (max_audio_seconds > 0.0).then_some(max_audio_seconds),
            ..defaults
        }
        .with_direct_pitch(use_direct);

        config.validated()
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable configuration value {:?}", value);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.analysis_sample_rate, 16_000);
        assert_eq!(config.timing_sample_rate, 16_000);
        assert_eq!(config.hop_length, 768);
        assert_eq!(config.fast_hop_length, 1024);
        assert_eq!(config.pitch_tolerance_hz, 20.0);
        assert_eq!(config.pitch_strategies, vec![PitchStrategy::PeakMagnitude]);
        assert!(config.clone().validated().is_ok());
    }

    #[test]
    fn test_validated_applies_floors() {
        let config = ScoringConfig {
            analysis_sample_rate: 4000,
            timing_sample_rate: 100,
            hop_length: 64,
            fast_hop_length: 128,
            ..ScoringConfig::default()
        }
        .validated()
        .unwrap();

        assert_eq!(config.analysis_sample_rate, MIN_SAMPLE_RATE);
        assert_eq!(config.timing_sample_rate, MIN_SAMPLE_RATE);
        assert_eq!(config.hop_length, MIN_HOP_LENGTH);
        // Fast hop never drops below the standard hop
        assert_eq!(config.fast_hop_length, MIN_HOP_LENGTH);
    }

    #[test]
    fn test_validated_rejects_bad_values() {
        let no_strategies = ScoringConfig {
            pitch_strategies: vec![],
            ..ScoringConfig::default()
        };
        assert!(matches!(
            no_strategies.validated(),
            Err(ScoringError::Config(_))
        ));

        let bad_tolerance = ScoringConfig {
            pitch_tolerance_hz: f32::NAN,
            ..ScoringConfig::default()
        };
        assert!(bad_tolerance.validated().is_err());

        let bad_limit = ScoringConfig {
            max_audio_seconds: Some(0.0),
            ..ScoringConfig::default()
        };
        assert!(bad_limit.validated().is_err());
    }

    #[test]
    fn test_with_direct_pitch_ordering() {
        let config = ScoringConfig::default().with_direct_pitch(true);
        assert_eq!(
            config.pitch_strategies,
            vec![PitchStrategy::DirectF0, PitchStrategy::PeakMagnitude]
        );

        // Idempotent, and reversible
        let config = config.with_direct_pitch(true);
        assert_eq!(config.pitch_strategies.len(), 2);
        let config = config.with_direct_pitch(false);
        assert_eq!(config.pitch_strategies, vec![PitchStrategy::PeakMagnitude]);
    }

    #[test]
    fn test_hop_length_for_mode() {
        let config = ScoringConfig::default();
        assert_eq!(config.hop_length_for(AnalysisMode::Standard), 768);
        assert_eq!(config.hop_length_for(AnalysisMode::Fast), 1024);
    }

    #[test]
    fn test_from_lookup() {
        let config = ScoringConfig::from_lookup(lookup_from(&[
            ("VOCAL_SCORING_USE_DIRECT_PITCH", "Yes"),
            ("VOCAL_SCORING_ANALYSIS_SAMPLE_RATE", "22050"),
            ("VOCAL_SCORING_HOP_LENGTH", "not-a-number"),
            ("VOCAL_SCORING_FAST_HOP_LENGTH", "512"),
        ]))
        .unwrap();

        assert_eq!(config.pitch_strategies[0], PitchStrategy::DirectF0);
        assert_eq!(config.analysis_sample_rate, 22_050);
        assert_eq!(config.timing_sample_rate, 16_000);
        assert_eq!(config.hop_length, 768);
        // 512 is below the standard hop, so it is raised
        assert_eq!(config.fast_hop_length, 768);
    }

    #[test]
    fn test_from_lookup_max_audio_seconds() {
        let config = ScoringConfig::from_lookup(lookup_from(&[(
            "VOCAL_SCORING_MAX_AUDIO_SECONDS",
            "90",
        )]))
        .unwrap();
        assert_eq!(config.max_audio_seconds, Some(90.0));

        let config = ScoringConfig::from_lookup(lookup_from(&[(
            "VOCAL_SCORING_MAX_AUDIO_SECONDS",
            "0",
        )]))
        .unwrap();
        assert_eq!(config.max_audio_seconds, None);

        let config = ScoringConfig::from_lookup(lookup_from(&[(
            "VOCAL_SCORING_MAX_AUDIO_SECONDS",
            "a minute",
        )]))
        .unwrap();
        assert_eq!(config.max_audio_seconds, Some(60.0));
    }

    #[test]
    fn test_from_lookup_empty_environment() {
        let config = ScoringConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }
}
