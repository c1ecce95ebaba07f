//! Duration-guarded source loading

use super::provider::{DecodedAudio, SignalProvider};
use crate::error::{ProviderStage, ScoringError};
use std::path::Path;

/// Decode `path` through `provider` and enforce the duration limit
///
/// # Arguments
///
/// * `provider` - Signal primitive provider
/// * `path` - Audio source to decode
/// * `sample_rate` - Target sample rate passed to the provider
/// * `max_seconds` - Longest accepted duration, `None` for no limit
/// * `label` - Source name used in errors ("User" or "Reference")
///
/// # Errors
///
/// - `Provider` if decoding fails or yields no samples
/// - `AudioTooLong` if the decoded duration exceeds `max_seconds`
pub fn load_source<P: SignalProvider + ?Sized>(
    provider: &P,
    path: &Path,
    sample_rate: u32,
    max_seconds: Option<f32>,
    label: &'static str,
) -> Result<DecodedAudio, ScoringError> {
    let audio = provider.decode_and_resample(path, Some(sample_rate))?;

    if audio.samples.is_empty() || audio.sample_rate == 0 {
        return Err(ScoringError::provider(
            ProviderStage::Decode,
            format!("Could not read {} audio: no samples decoded", label.to_lowercase()),
        ));
    }

    let duration_seconds = audio.duration_seconds();
    log::debug!(
        "Decoded {} audio: {} samples at {} Hz ({:.2}s)",
        label,
        audio.samples.len(),
        audio.sample_rate,
        duration_seconds
    );

    if let Some(limit_seconds) = max_seconds {
        if duration_seconds > limit_seconds {
            return Err(ScoringError::AudioTooLong {
                label,
                duration_seconds,
                limit_seconds,
            });
        }
    }

    Ok(audio)
}
