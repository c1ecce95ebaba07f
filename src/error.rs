//! Error types for the scoring engine

use std::fmt;
use thiserror::Error;

/// Signal primitive that failed inside a [`SignalProvider`](crate::io::provider::SignalProvider)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStage {
    /// Audio decoding or resampling
    Decode,
    /// Frame x bin pitch candidates
    PitchFrames,
    /// Per-frame fundamental estimate
    DirectPitch,
    /// Onset-strength envelope
    OnsetEnvelope,
    /// Tempo estimation
    Tempo,
}

impl fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderStage::Decode => "decode",
            ProviderStage::PitchFrames => "pitch frames",
            ProviderStage::DirectPitch => "direct pitch",
            ProviderStage::OnsetEnvelope => "onset envelope",
            ProviderStage::Tempo => "tempo",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while scoring a performance
///
/// Insufficient data is never an error: scorers degrade to 0.0 instead.
#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    /// Invalid input parameters or malformed provider output
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A signal primitive failed; fatal to the current call
    #[error("Audio analysis failed during {stage}: {message}")]
    Provider {
        /// Primitive that failed
        stage: ProviderStage,
        /// Provider-supplied description
        message: String,
    },

    /// Decoded audio is longer than the configured limit
    #[error("{label} audio is {duration_seconds:.1}s, exceeding the {limit_seconds:.0}s limit")]
    AudioTooLong {
        /// Which source was rejected ("User" or "Reference")
        label: &'static str,
        /// Decoded duration
        duration_seconds: f32,
        /// Configured maximum
        limit_seconds: f32,
    },

    /// Configuration rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScoringError {
    /// Shorthand for a provider failure at `stage`
    pub fn provider(stage: ProviderStage, message: impl Into<String>) -> Self {
        ScoringError::Provider {
            stage,
            message: message.into(),
        }
    }

    /// Error a provider returns for a primitive it does not implement
    pub fn unsupported(stage: ProviderStage) -> Self {
        Self::provider(stage, "not supported by this provider")
    }
}
