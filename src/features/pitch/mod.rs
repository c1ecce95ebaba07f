//! Pitch contour extraction
//!
//! Turns provider pitch estimates into a voiced-only [`PitchContour`]:
//! - Contour reduction (peak-magnitude matrix path and direct f0 path)
//! - Ordered extraction strategies with silent fallback

pub mod reducer;
pub mod strategy;

use serde::{Deserialize, Serialize};

/// Reference pitch for the semitone scale (A4)
const A4_HZ: f32 = 440.0;

/// Semitone number of A4 on the MIDI scale
const A4_SEMITONE: f32 = 69.0;

/// Ordered sequence of voiced pitch values in Hz
///
/// One value per voiced analysis frame. Unvoiced frames are removed rather
/// than zero-filled, so two contours line up by index only, never by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchContour(Vec<f32>);

impl PitchContour {
    /// Wrap frequencies that are already voiced-only
    pub fn new(frequencies: Vec<f32>) -> Self {
        Self(frequencies)
    }

    /// Frequencies in Hz
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Number of frames in the contour
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the contour holds no frames
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Strictly positive frequencies only
    pub fn voiced(&self) -> Vec<f32> {
        self.0.iter().copied().filter(|&hz| hz > 0.0).collect()
    }

    /// Consume the contour, returning the frequencies
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for PitchContour {
    fn from(frequencies: Vec<f32>) -> Self {
        Self(frequencies)
    }
}

/// Convert a frequency in Hz to the semitone (MIDI) scale
///
/// `69` is A4 = 440 Hz; one unit is one equal-tempered semitone.
pub fn hz_to_semitones(hz: f32) -> f32 {
    A4_SEMITONE + 12.0 * (hz / A4_HZ).log2()
}

/// Convert a slice of frequencies to semitones
pub fn contour_to_semitones(frequencies: &[f32]) -> Vec<f32> {
    frequencies.iter().map(|&hz| hz_to_semitones(hz)).collect()
}
