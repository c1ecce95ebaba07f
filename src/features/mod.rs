//! Feature extraction and shared numerics
//!
//! This module contains the signal-level building blocks the scorers use:
//! - Pitch contours (reduction and strategy fallback)
//! - Onset envelopes (guarded correlation)
//! - Moving-average smoothing
//! - Robust statistics

pub mod onset;
pub mod pitch;
pub mod smoothing;
pub mod statistics;
