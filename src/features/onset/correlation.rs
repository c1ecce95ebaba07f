//! Guarded onset-envelope correlation

use crate::features::statistics::{pearson_correlation, population_std};

/// Shortest common envelope length worth correlating
pub const MIN_CORRELATION_FRAMES: usize = 8;

/// Standard deviation below which an envelope counts as flat (silent)
const FLAT_STD: f64 = 1e-8;

/// Pearson correlation of two onset envelopes over their common length
///
/// Returns 0.0 instead of a degenerate value when:
/// - the common length is below [`MIN_CORRELATION_FRAMES`]
/// - either truncated envelope is flat (std < 1e-8)
/// - the correlation is not finite
///
/// The result lies in [-1, 1].
pub fn onset_correlation(reference: &[f32], user: &[f32]) -> f32 {
    let length = reference.len().min(user.len());
    if length < MIN_CORRELATION_FRAMES {
        log::debug!("Onset correlation skipped: only {} common frames", length);
        return 0.0;
    }

    let reference = &reference[..length];
    let user = &user[..length];

    if population_std(reference) < FLAT_STD || population_std(user) < FLAT_STD {
        log::debug!("Onset correlation skipped: flat envelope");
        return 0.0;
    }

    let corr = pearson_correlation(reference, user);
    if !corr.is_finite() {
        return 0.0;
    }

    corr.clamp(-1.0, 1.0) as f32
}
