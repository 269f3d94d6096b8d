//! Document model for a parsed song sheet.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── title / artist / key / capo (metadata)
//!   ├── transposition (cumulative semitone shift, derived state)
//!   └── Vec<Paragraph>
//!         ├── kind: ParagraphType (verse | chorus | tab | bridge | none)
//!         └── Vec<Line>
//!               └── Vec<Item> (Pair | Comment | Directive)
//! ```
//!
//! A `Pair` couples a lyric fragment with the chord (if any) sounding over
//! it. The transposer adds a derived `transposed_chord` alongside the
//! original so a display layer can show both at once; the serializer folds
//! the transposed form into the persisted text.
//!
//! Songs are constructed fresh by a parser, transposed in place, consumed
//! read-only by the serializer and then discarded; they carry no persistence
//! identity.

use serde::{Deserialize, Serialize};

use crate::chord::Chord;

/// Structural class of a paragraph, set from the source's section markers.
/// It drives rendering conventions downstream and carries no parsing
/// obligation of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphType {
    Verse,
    Chorus,
    Tab,
    Bridge,
    #[default]
    None,
}

impl ParagraphType {
    /// Tag name used in `{start_of_X}` / `{end_of_X}` boundaries; untyped
    /// paragraphs have none.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            ParagraphType::Verse => Some("verse"),
            ParagraphType::Chorus => Some("chorus"),
            ParagraphType::Tab => Some("tab"),
            ParagraphType::Bridge => Some("bridge"),
            ParagraphType::None => None,
        }
    }

    pub fn from_tag(tag: &str) -> ParagraphType {
        match tag {
            "verse" => ParagraphType::Verse,
            "chorus" => ParagraphType::Chorus,
            "tab" => ParagraphType::Tab,
            "bridge" => ParagraphType::Bridge,
            _ => ParagraphType::None,
        }
    }
}

/// The atomic cell of a song line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// A lyric fragment with the chord (if any) sounding over it.
    Pair {
        /// Chord as written in the source; never modified after parsing.
        chord: Option<Chord>,
        /// Derived by the transposer from `chord`; never part of the
        /// persisted text.
        transposed_chord: Option<Chord>,
        lyrics: String,
    },
    /// Free-form annotation ("Intro", "2x"), not lyrics.
    Comment { text: String },
    /// A `{name: value}` directive preserved in place by the tags dialect.
    Directive { name: String, value: String },
}

impl Item {
    /// A lyric-chord pair with no transposition applied yet.
    pub fn pair(chord: Option<Chord>, lyrics: impl Into<String>) -> Item {
        Item::Pair {
            chord,
            transposed_chord: None,
            lyrics: lyrics.into(),
        }
    }
}

/// Ordered items of one source line. An empty line is a valid blank
/// separator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub items: Vec<Item>,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub kind: ParagraphType,
    pub lines: Vec<Line>,
}

/// Root of the document model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Song {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Nominal key; replaced (not annotated) when the song is transposed.
    pub key: Option<Chord>,
    pub capo: Option<u32>,
    /// Cumulative semitone shift applied by the transposer. Fresh parses
    /// start at 0; `transposed_chord` values are always derived from the
    /// original chords using this total, so repeated passes never compound.
    pub transposition: i32,
    pub paragraphs: Vec<Paragraph>,
}

impl Song {
    pub fn new() -> Song {
        Song::default()
    }

    /// Distinct chords of the document in first-appearance order, using the
    /// original spellings. Display layers use this to pick which fingering
    /// diagrams to show.
    pub fn chords(&self) -> Vec<&Chord> {
        let mut seen: Vec<&Chord> = Vec::new();
        for paragraph in &self.paragraphs {
            for line in &paragraph.lines {
                for item in &line.items {
                    if let Item::Pair {
                        chord: Some(chord), ..
                    } = item
                    {
                        if !seen.contains(&chord) {
                            seen.push(chord);
                        }
                    }
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Chord;

    #[test]
    fn chords_are_deduplicated_in_order() {
        let mut song = Song::new();
        song.paragraphs.push(Paragraph {
            kind: ParagraphType::Verse,
            lines: vec![Line {
                items: vec![
                    Item::pair(Some(Chord::parse("C").unwrap()), "one "),
                    Item::pair(Some(Chord::parse("G").unwrap()), "two "),
                    Item::pair(Some(Chord::parse("C").unwrap()), "three"),
                ],
            }],
        });
        let chords: Vec<String> = song.chords().iter().map(|c| c.to_string()).collect();
        assert_eq!(chords, vec!["C", "G"]);
    }

    #[test]
    fn paragraph_type_tags_round_trip() {
        for kind in [
            ParagraphType::Verse,
            ParagraphType::Chorus,
            ParagraphType::Tab,
            ParagraphType::Bridge,
        ] {
            let tag = kind.tag().unwrap();
            assert_eq!(ParagraphType::from_tag(tag), kind);
        }
        assert_eq!(ParagraphType::None.tag(), None);
    }
}
