//! Canonical tag dialect.
//!
//! This is the form the engine persists: `{name: value}` directive lines
//! for metadata and paragraph boundaries, inline `[C]` chord tokens inside
//! lyric lines. The serializer emits it; see `serialize`.
//!
//! Directive handling:
//! - `title`, `artist`, `key`, `capo` map onto the song metadata (`key`
//!   through `Chord::parse`, `capo` through integer parsing; failures are
//!   ignored rather than fatal),
//! - `start_of_verse|chorus|tab|bridge` and the matching `end_of_*` delimit
//!   typed paragraphs,
//! - `comment` / `c` produce a comment item on its own line,
//! - anything else is preserved in place as a directive item and re-emitted
//!   verbatim on serialization.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lex_tagged_line;
use crate::chord::Chord;
use crate::song::{Item, Line, Paragraph, ParagraphType, Song};

/// A `{name}` or `{name: value}` line.
static DIRECTIVE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{\s*([^:}]+?)\s*(?::\s*([^}]*?)\s*)?\}\s*$").unwrap());

/// A `{name: value}` line; the shape detection keys on.
static DIRECTIVE_WITH_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{[^:}]+:[^}]*\}\s*$").unwrap());

/// An inline chord token embedded in a lyric line.
static INLINE_CHORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[A-Ga-g][#♯b♭]?[^\]\n]*\]").unwrap());

pub(crate) fn matches(text: &str) -> bool {
    INLINE_CHORD.is_match(text) || text.lines().any(|line| DIRECTIVE_WITH_VALUE.is_match(line))
}

pub fn parse(text: &str) -> Song {
    let mut song = Song::new();
    let mut current: Option<Paragraph> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            if let Some(paragraph) = current.take() {
                if paragraph.lines.is_empty() {
                    current = Some(paragraph);
                } else {
                    song.paragraphs.push(paragraph);
                }
            }
            continue;
        }

        if let Some(caps) = DIRECTIVE_LINE.captures(line) {
            let name = caps[1].to_ascii_lowercase();
            let value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            match name.as_str() {
                "title" => song.title = Some(value.to_string()),
                "artist" => song.artist = Some(value.to_string()),
                "key" => song.key = Chord::parse(value).ok(),
                "capo" => song.capo = value.parse().ok(),
                "comment" | "c" => {
                    current.get_or_insert_with(Paragraph::default).lines.push(Line {
                        items: vec![Item::Comment {
                            text: value.to_string(),
                        }],
                    });
                }
                _ => {
                    if let Some(tag) = name.strip_prefix("start_of_") {
                        flush(&mut song, &mut current);
                        current = Some(Paragraph {
                            kind: ParagraphType::from_tag(tag),
                            lines: Vec::new(),
                        });
                    } else if name.strip_prefix("end_of_").is_some() {
                        flush(&mut song, &mut current);
                    } else {
                        current.get_or_insert_with(Paragraph::default).lines.push(Line {
                            items: vec![Item::Directive {
                                name,
                                value: value.to_string(),
                            }],
                        });
                    }
                }
            }
            continue;
        }

        current
            .get_or_insert_with(Paragraph::default)
            .lines
            .push(lex_tagged_line(line));
    }

    flush(&mut song, &mut current);
    song
}

fn flush(song: &mut Song, current: &mut Option<Paragraph>) {
    if let Some(paragraph) = current.take() {
        if !paragraph.lines.is_empty() {
            song.paragraphs.push(paragraph);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_metadata_directives() {
        let song = parse("{title: Foo}\n{artist: Bar}\n{key: Bb}\n{capo: 2}\n\n[C]Hello");
        assert_eq!(song.title.as_deref(), Some("Foo"));
        assert_eq!(song.artist.as_deref(), Some("Bar"));
        assert_eq!(song.key.as_ref().map(|k| k.to_string()).as_deref(), Some("Bb"));
        assert_eq!(song.capo, Some(2));
        assert_eq!(song.paragraphs.len(), 1);
    }

    #[test]
    fn bad_key_and_capo_values_are_ignored() {
        let song = parse("{key: nope}\n{capo: many}\nwords");
        assert_eq!(song.key, None);
        assert_eq!(song.capo, None);
    }

    #[test]
    fn section_directives_delimit_typed_paragraphs() {
        let song = parse("{start_of_chorus}\n[C]La la\n{end_of_chorus}\nbare line");
        assert_eq!(song.paragraphs.len(), 2);
        assert_eq!(song.paragraphs[0].kind, ParagraphType::Chorus);
        assert_eq!(song.paragraphs[1].kind, ParagraphType::None);
    }

    #[test]
    fn all_section_kinds_are_recognized() {
        let text = "{start_of_verse}\nv\n{end_of_verse}\n{start_of_tab}\nt\n{end_of_tab}\n{start_of_bridge}\nb\n{end_of_bridge}";
        let song = parse(text);
        let kinds: Vec<ParagraphType> = song.paragraphs.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![ParagraphType::Verse, ParagraphType::Tab, ParagraphType::Bridge]
        );
    }

    #[test]
    fn comments_become_comment_items() {
        let song = parse("{comment: Intro}\n[C]Hello");
        assert_eq!(
            song.paragraphs[0].lines[0].items,
            vec![Item::Comment {
                text: "Intro".to_string()
            }]
        );
    }

    #[test]
    fn unknown_directives_are_preserved_in_place() {
        let song = parse("{tempo: 120}\nwords");
        assert_eq!(
            song.paragraphs[0].lines[0].items,
            vec![Item::Directive {
                name: "tempo".to_string(),
                value: "120".to_string()
            }]
        );
    }

    #[test]
    fn inline_lexing_matches_the_sections_dialect() {
        let song = parse("[C]Hello [G]world");
        assert_eq!(
            song.paragraphs[0].lines[0].items,
            vec![
                Item::pair(Some(Chord::parse("C").unwrap()), "Hello "),
                Item::pair(Some(Chord::parse("G").unwrap()), "world"),
            ]
        );
    }

    #[test]
    fn empty_input_is_an_empty_song() {
        assert_eq!(parse(""), Song::new());
    }
}
