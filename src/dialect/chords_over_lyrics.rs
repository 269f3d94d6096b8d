//! Plain chord-sheet dialect.
//!
//! Chords sit on their own line directly above the lyric line they
//! annotate, aligned by character column:
//!
//! ```text
//! C       G
//! Hello   world
//! ```
//!
//! Each chord applies to the lyric text from its starting column up to the
//! next chord's column (or the line end). A chord line with nothing
//! singable under it becomes an instrumental line of chord-only pairs.

use super::paragraph_blocks;
use crate::chord::Chord;
use crate::song::{Item, Line, Paragraph, Song};

/// Parse a line as whitespace-separated chord tokens with their starting
/// character columns. `None` unless every token is chord-shaped.
fn chord_tokens(line: &str) -> Option<Vec<(usize, Chord)>> {
    let mut tokens: Vec<(usize, Chord)> = Vec::new();
    let mut word = String::new();
    let mut word_col = 0;
    for (col, c) in line.chars().enumerate() {
        if c.is_whitespace() {
            if !word.is_empty() {
                tokens.push((word_col, Chord::parse(&word).ok()?));
                word.clear();
            }
        } else {
            if word.is_empty() {
                word_col = col;
            }
            word.push(c);
        }
    }
    if !word.is_empty() {
        tokens.push((word_col, Chord::parse(&word).ok()?));
    }
    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}

/// True when some line consists solely of chord-shaped words. Used by the
/// plain-text detection order.
pub(crate) fn matches(text: &str) -> bool {
    text.lines().any(|line| chord_tokens(line).is_some())
}

pub fn parse(text: &str) -> Song {
    let mut song = Song::new();
    for block in paragraph_blocks(text) {
        let mut paragraph = Paragraph::default();
        let mut i = 0;
        while i < block.len() {
            match chord_tokens(block[i]) {
                Some(chords) => {
                    let lyric_line = block
                        .get(i + 1)
                        .copied()
                        .filter(|next| chord_tokens(next).is_none());
                    match lyric_line {
                        Some(lyrics) => {
                            paragraph.lines.push(pair_up(&chords, lyrics));
                            i += 2;
                        }
                        None => {
                            // instrumental: chords with no lyrics under them
                            let items = chords
                                .into_iter()
                                .map(|(_, chord)| Item::pair(Some(chord), ""))
                                .collect();
                            paragraph.lines.push(Line { items });
                            i += 1;
                        }
                    }
                }
                None => {
                    paragraph.lines.push(Line {
                        items: vec![Item::pair(None, block[i])],
                    });
                    i += 1;
                }
            }
        }
        if !paragraph.lines.is_empty() {
            song.paragraphs.push(paragraph);
        }
    }
    song
}

/// Split `lyrics` at each chord's starting column. A chord anchored at or
/// past the end of the lyric line keeps an empty remainder.
fn pair_up(chords: &[(usize, Chord)], lyrics: &str) -> Line {
    let chars: Vec<char> = lyrics.chars().collect();
    let mut items: Vec<Item> = Vec::new();

    let first_col = chords[0].0.min(chars.len());
    if first_col > 0 {
        let head: String = chars[..first_col].iter().collect();
        items.push(Item::pair(None, head));
    }
    for (idx, (col, chord)) in chords.iter().enumerate() {
        let start = (*col).min(chars.len());
        let end = chords
            .get(idx + 1)
            .map(|&(next_col, _)| next_col)
            .unwrap_or(usize::MAX)
            .min(chars.len())
            .max(start);
        let fragment: String = chars[start..end].iter().collect();
        items.push(Item::pair(Some(chord.clone()), fragment));
    }
    Line { items }
}
