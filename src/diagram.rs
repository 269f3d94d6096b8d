//! Chord fingering diagrams.
//!
//! A static fingering database embedded in the crate, indexed by
//! instrument, root key and suffix. The database spells each semitone class
//! one way, so lookups normalize the chord root through the same
//! enharmonic preference table transposition uses (`Db` finds the `C#`
//! entry). Lookups never fail; a missing diagram is an absent value.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chord::{Chord, PitchClass};

/// Instrument the fingering database knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Guitar,
    Ukulele,
    Keyboard,
}

impl Instrument {
    pub fn from_str(s: &str) -> Option<Instrument> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guitar" => Some(Instrument::Guitar),
            "ukulele" => Some(Instrument::Ukulele),
            "keyboard" => Some(Instrument::Keyboard),
            _ => None,
        }
    }
}

/// One fingering for a chord.
///
/// For fretted instruments `frets` is one entry per string, low to high,
/// with `-1` marking a muted string; `barres` lists barred frets. For
/// keyboard the entries are semitone offsets from the root and `barres` is
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingeringPosition {
    pub base_fret: i32,
    pub frets: Vec<i32>,
    #[serde(default)]
    pub barres: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct DiagramEntry {
    key: String,
    suffix: String,
    positions: Vec<FingeringPosition>,
}

#[derive(Debug, Deserialize)]
struct DiagramDb {
    guitar: Vec<DiagramEntry>,
    ukulele: Vec<DiagramEntry>,
    keyboard: Vec<DiagramEntry>,
}

static DIAGRAMS: Lazy<DiagramDb> = Lazy::new(|| {
    serde_yaml::from_str(include_str!("diagrams.yaml"))
        .expect("embedded fingering database is valid YAML")
});

/// Database suffix for a written chord quality.
fn canonical_suffix(suffix: &str) -> &str {
    match suffix.trim() {
        "" | "M" | "maj" => "major",
        "m" | "min" | "-" => "minor",
        "+" | "aug" => "aug",
        "°" | "dim" => "dim",
        "M7" | "maj7" => "maj7",
        "m7" | "min7" | "-7" => "m7",
        other => other,
    }
}

/// Look up the `position`-th fingering of a chord on an instrument.
///
/// # Example
/// ```
/// # use songsheet::{find_diagram, Chord, Instrument};
/// let c = Chord::parse("C").unwrap();
/// let diagram = find_diagram(&c, Instrument::Guitar, 0).unwrap();
/// assert_eq!(diagram.frets, vec![-1, 3, 2, 0, 1, 0]);
/// assert!(find_diagram(&c, Instrument::Guitar, 99).is_none());
/// ```
pub fn find_diagram(
    chord: &Chord,
    instrument: Instrument,
    position: usize,
) -> Option<&'static FingeringPosition> {
    let key = PitchClass::from_semitone(chord.root.semitone()).to_string();
    let suffix = canonical_suffix(&chord.suffix);
    let entries = match instrument {
        Instrument::Guitar => &DIAGRAMS.guitar,
        Instrument::Ukulele => &DIAGRAMS.ukulele,
        Instrument::Keyboard => &DIAGRAMS.keyboard,
    };
    entries
        .iter()
        .find(|entry| entry.key == key && entry.suffix == suffix)
        .and_then(|entry| entry.positions.get(position))
}
