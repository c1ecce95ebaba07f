//! Pitch contour reduction
//!
//! Collapses provider pitch estimates into a voiced-only contour.
//!
//! Two input shapes are supported:
//! 1. **Peak magnitude**: a frame x bin matrix of frequency candidates with an
//!    equal-shaped magnitude matrix. Each frame keeps the candidate at its
//!    loudest bin; frames whose pick is not positive are unvoiced.
//! 2. **Direct f0**: one fundamental estimate per frame, unvoiced frames marked
//!    non-finite.
//!
//! Unvoiced frames are dropped, never zero-filled.

use super::PitchContour;
use crate::error::ScoringError;

/// Frame-major pitch candidates as produced by a pitch tracker
///
/// `frequencies[frame][bin]` pairs with `magnitudes[frame][bin]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchFrames {
    frequencies: Vec<Vec<f32>>,
    magnitudes: Vec<Vec<f32>>,
}

impl PitchFrames {
    /// Build from frame-major matrices
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the matrices differ in frame count or in
    /// bin count for any frame.
    pub fn new(frequencies: Vec<Vec<f32>>, magnitudes: Vec<Vec<f32>>) -> Result<Self, ScoringError> {
        if frequencies.len() != magnitudes.len() {
            return Err(ScoringError::InvalidInput(format!(
                "Pitch frame count mismatch: {} frequency frames, {} magnitude frames",
                frequencies.len(),
                magnitudes.len()
            )));
        }

        if let Some((frame, (f, m))) = frequencies
            .iter()
            .zip(&magnitudes)
            .enumerate()
            .find(|(_, (f, m))| f.len() != m.len())
        {
            return Err(ScoringError::InvalidInput(format!(
                "Pitch bin count mismatch at frame {}: {} frequencies, {} magnitudes",
                frame,
                f.len(),
                m.len()
            )));
        }

        Ok(Self {
            frequencies,
            magnitudes,
        })
    }

    /// Build from bin-major matrices (`matrix[bin][frame]`), the layout most
    /// spectral pitch trackers emit
    pub fn from_bin_major(
        frequencies: &[Vec<f32>],
        magnitudes: &[Vec<f32>],
    ) -> Result<Self, ScoringError> {
        Self::new(transpose(frequencies)?, transpose(magnitudes)?)
    }

    /// Number of analysis frames
    pub fn num_frames(&self) -> usize {
        self.frequencies.len()
    }
}

fn transpose(matrix: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, ScoringError> {
    let frames = matrix.first().map_or(0, Vec::len);
    if matrix.iter().any(|row| row.len() != frames) {
        return Err(ScoringError::InvalidInput(
            "Ragged bin-major pitch matrix".to_string(),
        ));
    }

    Ok((0..frames)
        .map(|frame| matrix.iter().map(|row| row[frame]).collect())
        .collect())
}

/// Reduce a candidate matrix to a contour by peak magnitude
///
/// For each frame the frequency at the bin of maximal magnitude is selected;
/// ties resolve to the lowest bin index. Frames whose selection is not
/// positive, and frames with no bins, are dropped.
pub fn reduce_peak_magnitude(frames: &PitchFrames) -> PitchContour {
    let voiced: Vec<f32> = frames
        .frequencies
        .iter()
        .zip(&frames.magnitudes)
        .filter_map(|(freqs, mags)| {
            let bin = peak_bin(mags)?;
            let hz = freqs[bin];
            (hz > 0.0).then_some(hz)
        })
        .collect();

    log::debug!(
        "Peak-magnitude reduction: {} of {} frames voiced",
        voiced.len(),
        frames.num_frames()
    );

    PitchContour::new(voiced)
}

/// Index of the first maximal magnitude
fn peak_bin(magnitudes: &[f32]) -> Option<usize> {
    if magnitudes.is_empty() {
        return None;
    }

    let mut best = 0;
    for (bin, &mag) in magnitudes.iter().enumerate().skip(1) {
        // Strict comparison keeps the lowest index among ties
        if mag > magnitudes[best] {
            best = bin;
        }
    }
    Some(best)
}

/// Reduce a per-frame fundamental estimate to a contour
///
/// Non-finite values mark unvoiced frames and are dropped, as are
/// non-positive values.
pub fn reduce_direct(f0: &[f32]) -> PitchContour {
    let voiced: Vec<f32> = f0
        .iter()
        .copied()
        .filter(|hz| hz.is_finite() && *hz > 0.0)
        .collect();

    log::debug!("Direct f0 reduction: {} of {} frames voiced", voiced.len(), f0.len());

    PitchContour::new(voiced)
}
