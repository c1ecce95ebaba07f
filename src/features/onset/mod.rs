//! Onset-strength envelopes
//!
//! The envelope itself is computed by the signal provider; this module holds
//! the envelope type and the guarded correlation used to compare two
//! performances rhythmically.

pub mod correlation;

use serde::{Deserialize, Serialize};

/// Onset strength per analysis frame, from a single audio source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OnsetEnvelope(Vec<f32>);

impl OnsetEnvelope {
    /// Wrap provider output
    pub fn new(strengths: Vec<f32>) -> Self {
        Self(strengths)
    }

    /// Onset strengths
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the envelope holds no frames
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for OnsetEnvelope {
    fn from(strengths: Vec<f32>) -> Self {
        Self(strengths)
    }
}
