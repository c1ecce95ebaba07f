//! Example: Score a performance from pitch contours
//!
//! Builds a reference melody and a slightly flat, wobbly take of it, scores
//! the take with and without the reference, and prints both reports as JSON.
//!
//! Run with `RUST_LOG=debug` to see the intermediate statistics.

use vocal_scoring::{PitchContour, ScoringConfig, ScoringEngine, TimingInputs};

fn melody(detune_semitones: f32, wobble: f32) -> PitchContour {
    let notes = [60.0, 62.0, 64.0, 65.0, 67.0, 65.0, 64.0, 62.0, 60.0];
    notes
        .iter()
        .flat_map(|&note| std::iter::repeat(note).take(12))
        .enumerate()
        .map(|(i, note)| {
            let semitone = note + detune_semitones + wobble * (i as f32 * 1.3).sin();
            440.0 * 2f32.powf((semitone - 69.0) / 12.0)
        })
        .collect::<Vec<f32>>()
        .into()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let engine = ScoringEngine::new(ScoringConfig::from_env()?)?;

    let reference = melody(0.0, 0.0);
    let take = melody(-0.2, 0.15);

    let envelope: Vec<f32> = (0..200)
        .map(|i| if i % 12 == 0 { 1.0 } else { 0.1 })
        .collect();
    let timing = TimingInputs {
        reference_onset: envelope.clone().into(),
        user_onset: envelope.into(),
        reference_tempo: 100.0,
        user_tempo: 96.0,
    };

    let with_reference = engine.score(&take, Some(&reference), Some(&timing));
    let without_reference = engine.score(&take, None, None);

    println!("With reference:");
    println!("{}", serde_json::to_string_pretty(&with_reference)?);
    println!("Without reference:");
    println!("{}", serde_json::to_string_pretty(&without_reference)?);

    Ok(())
}
