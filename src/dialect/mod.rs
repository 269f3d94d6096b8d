//! Dialect detection and parser dispatch.
//!
//! The engine understands three informal song-sheet notations:
//!
//! - **BracketedSections**: `[Verse 2]` / `[Chorus]` header lines with
//!   inline `[C]` chord tokens in the body (`sections`).
//! - **Tags**: `{title: ...}` directives with inline `[C]` chord tokens;
//!   this is the canonical form the serializer emits (`tags`).
//! - **ChordsOverLyrics**: chords on their own line directly above the
//!   lyric line they annotate, aligned by character column
//!   (`chords_over_lyrics`).
//!
//! Detection is an ordered list of `(dialect, predicate)` pairs; the first
//! predicate that matches wins. The order is a deliberate tie-break: a
//! section header is also a well-formed inline-chord line to the tags
//! grammar, so the section test must run first. Scraped plain text gets its
//! own order (`detect_for_plain_text`) because such sources rarely contain
//! canonical tags.

pub mod chords_over_lyrics;
pub mod sections;
pub mod tags;

use log::debug;

use crate::chord::Chord;
use crate::song::{Item, Line, Song};

/// The three song-sheet notations the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    BracketedSections,
    Tags,
    ChordsOverLyrics,
}

type Predicate = fn(&str) -> bool;

fn any_text(_: &str) -> bool {
    true
}

/// General detection order. First match wins.
const DETECT_ORDER: &[(Dialect, Predicate)] = &[
    (Dialect::BracketedSections, sections::matches),
    (Dialect::Tags, tags::matches),
    (Dialect::ChordsOverLyrics, any_text),
];

/// Re-import order for scraped plain text: the chord-grid test outranks the
/// tags test.
const DETECT_PLAIN_TEXT_ORDER: &[(Dialect, Predicate)] = &[
    (Dialect::BracketedSections, sections::matches),
    (Dialect::ChordsOverLyrics, chords_over_lyrics::matches),
    (Dialect::Tags, tags::matches),
    (Dialect::ChordsOverLyrics, any_text),
];

/// Pick the dialect a song body is written in. Returns `None` for empty or
/// whitespace-only input (a new/blank song, not an error).
pub fn detect(text: &str) -> Option<Dialect> {
    run_detect(text, DETECT_ORDER)
}

/// Like [`detect`], but with the priority order used when re-importing
/// scraped plain text.
pub fn detect_for_plain_text(text: &str) -> Option<Dialect> {
    run_detect(text, DETECT_PLAIN_TEXT_ORDER)
}

fn run_detect(text: &str, order: &[(Dialect, Predicate)]) -> Option<Dialect> {
    if text.trim().is_empty() {
        return None;
    }
    let dialect = order
        .iter()
        .find(|(_, predicate)| predicate(text))
        .map(|&(dialect, _)| dialect);
    if let Some(dialect) = dialect {
        debug!("detected dialect {:?}", dialect);
    }
    dialect
}

/// Parse a song body with an explicit dialect. Never fails: malformed input
/// degrades to a best-effort document.
pub fn parse(text: &str, dialect: Dialect) -> Song {
    match dialect {
        Dialect::BracketedSections => sections::parse(text),
        Dialect::Tags => tags::parse(text),
        Dialect::ChordsOverLyrics => chords_over_lyrics::parse(text),
    }
}

/// Split source text into paragraph blocks at blank-line runs. Blocks with
/// no non-blank line are dropped, so any run of blank lines collapses to a
/// single paragraph break.
pub(crate) fn paragraph_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Lex one `[C]Hello [G]world` line into lyric-chord pairs.
///
/// Text before the first bracket opens a pair with no chord. A bracketed
/// token that does not parse as a chord is kept as literal lyric text in the
/// current pair.
pub(crate) fn lex_tagged_line(line: &str) -> Line {
    let mut items: Vec<Item> = Vec::new();
    let mut chord: Option<Chord> = None;
    let mut lyrics = String::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        lyrics.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find(']') {
            Some(close) => {
                let token = &after_open[..close];
                match Chord::parse(token) {
                    Ok(next) => {
                        if chord.is_some() || !lyrics.is_empty() {
                            items.push(Item::pair(chord.take(), std::mem::take(&mut lyrics)));
                        }
                        chord = Some(next);
                    }
                    Err(_) => {
                        lyrics.push('[');
                        lyrics.push_str(token);
                        lyrics.push(']');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // unterminated bracket: literal
                lyrics.push('[');
                rest = after_open;
            }
        }
    }
    lyrics.push_str(rest);
    if chord.is_some() || !lyrics.is_empty() {
        items.push(Item::pair(chord, lyrics));
    }
    Line { items }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_format() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("   \n\t\n"), None);
        assert_eq!(detect_for_plain_text(""), None);
    }

    #[test]
    fn section_headers_win_over_tags() {
        let text = "[Verse 1]\n[C]Hello [G]world";
        assert_eq!(detect(text), Some(Dialect::BracketedSections));
        assert_eq!(
            detect_for_plain_text(text),
            Some(Dialect::BracketedSections)
        );
    }

    #[test]
    fn inline_chords_and_directives_detect_as_tags() {
        assert_eq!(detect("{title: Foo}\nplain words"), Some(Dialect::Tags));
        assert_eq!(detect("Hello [Am]world"), Some(Dialect::Tags));
    }

    #[test]
    fn anything_else_falls_back_to_chords_over_lyrics() {
        assert_eq!(
            detect("C       G\nHello   world"),
            Some(Dialect::ChordsOverLyrics)
        );
        assert_eq!(detect("just lyrics here"), Some(Dialect::ChordsOverLyrics));
    }

    #[test]
    fn plain_text_order_prefers_chord_grid_over_tags() {
        // A chord line plus a stray bracketed token: the general order calls
        // this tags, the re-import order calls it a chord grid.
        let text = "D G\nLyrics here\n[G]";
        assert_eq!(detect(text), Some(Dialect::Tags));
        assert_eq!(
            detect_for_plain_text(text),
            Some(Dialect::ChordsOverLyrics)
        );
    }

    #[test]
    fn lexes_inline_chords() {
        let line = lex_tagged_line("[C]Hello [G]world");
        assert_eq!(
            line.items,
            vec![
                Item::pair(Some(Chord::parse("C").unwrap()), "Hello "),
                Item::pair(Some(Chord::parse("G").unwrap()), "world"),
            ]
        );
    }

    #[test]
    fn text_before_first_chord_opens_a_chordless_pair() {
        let line = lex_tagged_line("Hello [C]world");
        assert_eq!(
            line.items,
            vec![
                Item::pair(None, "Hello "),
                Item::pair(Some(Chord::parse("C").unwrap()), "world"),
            ]
        );
    }

    #[test]
    fn bad_tokens_degrade_to_lyrics() {
        let line = lex_tagged_line("[H]ello [C]world");
        assert_eq!(
            line.items,
            vec![
                Item::pair(None, "[H]ello "),
                Item::pair(Some(Chord::parse("C").unwrap()), "world"),
            ]
        );
    }

    #[test]
    fn unterminated_bracket_is_literal() {
        let line = lex_tagged_line("oops [C");
        assert_eq!(line.items, vec![Item::pair(None, "oops [C")]);
    }

    #[test]
    fn adjacent_chords_make_empty_pairs() {
        let line = lex_tagged_line("[C][G]");
        assert_eq!(
            line.items,
            vec![
                Item::pair(Some(Chord::parse("C").unwrap()), ""),
                Item::pair(Some(Chord::parse("G").unwrap()), ""),
            ]
        );
    }

    #[test]
    fn blank_runs_collapse_to_one_paragraph_break() {
        let blocks = paragraph_blocks("a\n\n\n\n\nb\nc");
        assert_eq!(blocks, vec![vec!["a"], vec!["b", "c"]]);
    }
}
