//! Bracketed-section dialect.
//!
//! Paragraphs are introduced by `[Header]` lines; the header's first word
//! classifies verse/chorus/bridge. Body lines carry inline `[C]` chord
//! tokens exactly like the tags dialect, minus the `{...}` directives.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lex_tagged_line;
use crate::chord::Chord;
use crate::song::{Paragraph, ParagraphType, Song};

/// A line consisting solely of a `[Verse...]` / `[Chorus...]` header,
/// optionally numbered. This is the structural marker detection keys on.
static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*\[(verse|chorus)(\s+\d+)?\]\s*$").unwrap());

/// Any line that is nothing but one `[...]` group.
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[([^\]]+)\]\s*$").unwrap());

pub(crate) fn matches(text: &str) -> bool {
    text.lines().any(|line| SECTION_HEADER.is_match(line))
}

fn classify_header(inner: &str) -> Option<ParagraphType> {
    let first = inner.split_whitespace().next()?;
    match first.to_ascii_lowercase().as_str() {
        "verse" => Some(ParagraphType::Verse),
        "chorus" => Some(ParagraphType::Chorus),
        "bridge" => Some(ParagraphType::Bridge),
        _ => None,
    }
}

pub fn parse(text: &str) -> Song {
    let mut song = Song::new();
    // A marker opens a paragraph that survives blank lines until it gets
    // content; paragraphs that never get a non-blank line are dropped.
    let mut current: Option<Paragraph> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            if let Some(paragraph) = current.take() {
                if paragraph.lines.is_empty() {
                    // keep the pending marker open across the blank run
                    current = Some(paragraph);
                } else {
                    song.paragraphs.push(paragraph);
                }
            }
            continue;
        }

        if let Some(caps) = HEADER_LINE.captures(line) {
            let inner = caps[1].trim();
            let kind = classify_header(inner);
            // A bare chord line like "[C]" is body, not a marker.
            if kind.is_some() || Chord::parse(inner).is_err() {
                if let Some(paragraph) = current.take() {
                    if !paragraph.lines.is_empty() {
                        song.paragraphs.push(paragraph);
                    }
                }
                current = Some(Paragraph {
                    kind: kind.unwrap_or(ParagraphType::None),
                    lines: Vec::new(),
                });
                continue;
            }
        }

        current
            .get_or_insert_with(Paragraph::default)
            .lines
            .push(lex_tagged_line(line));
    }

    if let Some(paragraph) = current {
        if !paragraph.lines.is_empty() {
            song.paragraphs.push(paragraph);
        }
    }
    song
}
