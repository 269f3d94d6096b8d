//! In-document transposition.
//!
//! The original `chord` of every pair is never modified. The derived
//! `transposed_chord` is recomputed from it on every pass using the shift
//! accumulated on the song, so transposing by `a` and then by `b` leaves
//! exactly the state of a single `a + b` pass and nothing ever compounds
//! from previously derived values.

use log::debug;

use crate::song::{Item, Song};

/// Transpose every chord of the song by `semitones`, and shift the nominal
/// key with it. Takes and returns the song for chaining.
pub fn transpose(mut song: Song, semitones: i32) -> Song {
    song.transposition += semitones;
    let shift = song.transposition;
    debug!("transposing by {semitones} (accumulated shift {shift})");

    if let Some(key) = song.key.take() {
        song.key = Some(key.transpose(semitones));
    }
    for paragraph in &mut song.paragraphs {
        for line in &mut paragraph.lines {
            for item in &mut line.items {
                if let Item::Pair {
                    chord,
                    transposed_chord,
                    ..
                } = item
                {
                    *transposed_chord = chord.as_ref().map(|c| c.transpose(shift));
                }
            }
        }
    }
    song
}
