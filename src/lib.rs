pub mod chord;
pub mod diagram;
pub mod dialect;
pub mod error;
pub mod normalize;
pub mod serialize;
pub mod song;
pub mod transpose;

pub use chord::{Accidental, Chord, NoteLetter, PitchClass};
pub use diagram::{find_diagram, FingeringPosition, Instrument};
pub use dialect::{detect, detect_for_plain_text, parse, Dialect};
pub use error::SheetError;
pub use normalize::normalize_plaintext;
pub use serialize::serialize;
pub use song::{Item, Line, Paragraph, ParagraphType, Song};
pub use transpose::transpose;

/// Import a scraped plain-text blob: normalize it, pick a dialect with the
/// plain-text priority order, and parse.
/// This is the main entry point for the song import path.
pub fn import_plaintext(text: &str) -> Song {
    let cleaned = normalize_plaintext(text);
    match detect_for_plain_text(&cleaned) {
        Some(dialect) => parse(&cleaned, dialect),
        None => Song::new(),
    }
}

/// Re-key a song body: parse it in whatever dialect it is written in,
/// transpose, and render the canonical form with the transposed spellings
/// folded into the chords. Callers persist the result to make the new key
/// permanent.
pub fn convert_transposed(text: &str, semitones: i32) -> String {
    let song = match detect(text) {
        Some(dialect) => parse(text, dialect),
        None => Song::new(),
    };
    serialize(&transpose(song, semitones))
}
