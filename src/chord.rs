//! Chord and pitch-class model.
//!
//! A chord is a written root pitch (natural letter plus accidental) and a
//! free-text suffix ("m", "7", "maj7", "sus4", ...). The suffix is carried
//! verbatim through every operation; only the diagram resolver ever
//! interprets it.
//!
//! Transposition works on semitone classes (0-11) and re-spells the result
//! through a fixed preference table keyed by the target semitone, so the
//! written form of a transposed chord is deterministic and independent of
//! how the input was spelled.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Natural note letter A-G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    /// Parse a note letter from a char (case-insensitive).
    pub fn from_char(c: char) -> Option<NoteLetter> {
        match c.to_ascii_uppercase() {
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            _ => None,
        }
    }

    /// Semitone offset of the natural letter from C.
    pub fn semitone(self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
        }
    }
}

/// Written accidental of a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// A written pitch class: letter plus accidental.
///
/// Two spellings may denote the same semitone (enharmonic equivalents,
/// e.g. C# and Db); equality compares spellings, not semitones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchClass {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl PitchClass {
    /// Semitone class 0-11 of this spelling.
    pub fn semitone(self) -> i32 {
        (self.letter.semitone() + self.accidental.offset()).rem_euclid(12)
    }

    /// Preferred spelling for each of the 12 semitone classes.
    ///
    /// The table is total and keyed purely by the target semitone:
    /// 0=C, 1=C#, 2=D, 3=Eb, 4=E, 5=F, 6=F#, 7=G, 8=Ab, 9=A, 10=Bb, 11=B.
    pub fn from_semitone(semitone: i32) -> PitchClass {
        let (letter, accidental) = match semitone.rem_euclid(12) {
            0 => (NoteLetter::C, Accidental::Natural),
            1 => (NoteLetter::C, Accidental::Sharp),
            2 => (NoteLetter::D, Accidental::Natural),
            3 => (NoteLetter::E, Accidental::Flat),
            4 => (NoteLetter::E, Accidental::Natural),
            5 => (NoteLetter::F, Accidental::Natural),
            6 => (NoteLetter::F, Accidental::Sharp),
            7 => (NoteLetter::G, Accidental::Natural),
            8 => (NoteLetter::A, Accidental::Flat),
            9 => (NoteLetter::A, Accidental::Natural),
            10 => (NoteLetter::B, Accidental::Flat),
            11 => (NoteLetter::B, Accidental::Natural),
            _ => unreachable!(),
        };
        PitchClass { letter, accidental }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.glyph())
    }
}

/// A chord symbol: root pitch plus uninterpreted suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub root: PitchClass,
    pub suffix: String,
}

impl Chord {
    /// Parse a chord token.
    ///
    /// Accepts a leading natural letter A-G (case-insensitive, normalized to
    /// uppercase), an optional modifier (`#`/`♯` sharp, `b`/`♭` flat), and
    /// keeps the remainder verbatim as the suffix.
    ///
    /// # Example
    /// ```
    /// # use songsheet::Chord;
    /// assert_eq!(Chord::parse("F#m7").unwrap().to_string(), "F#m7");
    /// assert_eq!(Chord::parse("bb").unwrap().to_string(), "Bb");
    /// assert!(Chord::parse("H7").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Chord, SheetError> {
        let invalid = || SheetError::InvalidChordToken {
            token: text.to_string(),
        };
        let mut chars = text.chars();
        let first = chars.next().ok_or_else(invalid)?;
        let letter = NoteLetter::from_char(first).ok_or_else(invalid)?;
        let rest = chars.as_str();
        let (accidental, suffix) = if let Some(s) = rest.strip_prefix(['#', '♯']) {
            (Accidental::Sharp, s)
        } else if let Some(s) = rest.strip_prefix(['b', '♭']) {
            (Accidental::Flat, s)
        } else {
            (Accidental::Natural, rest)
        };
        Ok(Chord {
            root: PitchClass { letter, accidental },
            suffix: suffix.to_string(),
        })
    }

    /// Transpose by any number of semitones, re-spelling the root through
    /// the fixed preference table. The suffix is carried unchanged.
    ///
    /// A delta that is a multiple of 12 returns the input spelling as-is,
    /// so transposing by 0 or a full cycle is an exact identity.
    pub fn transpose(&self, semitones: i32) -> Chord {
        if semitones.rem_euclid(12) == 0 {
            return self.clone();
        }
        Chord {
            root: PitchClass::from_semitone(self.root.semitone() + semitones),
            suffix: self.suffix.clone(),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)
    }
}
