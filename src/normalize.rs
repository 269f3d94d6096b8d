//! Cleanup pipeline for scraped plain text.
//!
//! Scraped song pages arrive with tablature staves, bracketed section noise
//! and `tom:` key annotations mixed into the lyrics. The pipeline applies
//! four line-oriented transforms; each is idempotent on its own and so is
//! the whole pipeline, so re-normalizing already-clean text is a no-op.
//!
//! The outer-blank-line strip runs again at the end: deleting a tab stave
//! or a noise token can leave a blank first or last line behind, and the
//! result must be ready for detection as-is.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Six-string tablature stave line: string letter, `|`, fret text.
static TAB_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*[ebgda]\|[-0-9xhpbrs/\\~^().,*\s|]*\|?\s*$").unwrap());

/// Bracket directives scrapers leave behind. The match is deleted, the rest
/// of the line kept.
static NOISE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(intro|refr(ã|a)o|final|solo|(primeira|segunda|terceira) parte)\]").unwrap()
});

/// `tom:` (key) annotation, removed to end of line.
static KEY_ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)tom:.*").unwrap());

/// Strip leading and trailing blank lines, any number of them.
pub fn strip_outer_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).unwrap_or(start);
    lines[start..=end].join("\n")
}

/// Drop tablature stave lines entirely.
pub fn strip_tablature(text: &str) -> String {
    text.lines()
        .filter(|line| !TAB_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Delete known bracket-directive noise tokens, preserving the surrounding
/// text on the line.
pub fn strip_noise_tokens(text: &str) -> String {
    NOISE_TOKEN.replace_all(text, "").into_owned()
}

/// Delete `tom:` key annotations from their occurrence to end of line.
pub fn strip_key_annotations(text: &str) -> String {
    KEY_ANNOTATION.replace_all(text, "").into_owned()
}

/// Run the full cleanup pipeline over a scraped text blob.
pub fn normalize_plaintext(text: &str) -> String {
    let cleaned = strip_outer_blank_lines(text);
    let cleaned = strip_tablature(&cleaned);
    let cleaned = strip_noise_tokens(&cleaned);
    let cleaned = strip_key_annotations(&cleaned);
    let cleaned = strip_outer_blank_lines(&cleaned);
    if cleaned.len() != text.len() {
        debug!(
            "normalized scraped text: {} -> {} bytes",
            text.len(),
            cleaned.len()
        );
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_usual_scrape_noise() {
        let input = "\n\nE|--0--|\n[Intro]\ntom: G\nHello";
        assert_eq!(normalize_plaintext(input), "Hello");
    }

    #[test]
    fn pipeline_is_idempotent() {
        for input in [
            "\n\nE|--0--|\n[Intro]\ntom: G\nHello",
            "plain lyrics\n\nC G\nmore lyrics\n",
            "",
            "\n\n\n",
            "[Solo] riff\ne|--12--|\nwords",
        ] {
            let once = normalize_plaintext(input);
            assert_eq!(normalize_plaintext(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn removes_all_six_stave_letters() {
        let stave = "e|--0--1--|\nB|--1-----|\nG|--0-----|\nD|--2-----|\nA|--3-----|\nE|--------|\nwords";
        assert_eq!(normalize_plaintext(stave), "words");
    }

    #[test]
    fn keeps_lyric_lines_that_merely_start_with_a_stave_letter() {
        let text = "Every day I sing";
        assert_eq!(normalize_plaintext(text), text);
    }

    #[test]
    fn noise_tokens_preserve_surrounding_text() {
        assert_eq!(
            normalize_plaintext("before [Intro] after"),
            "before  after"
        );
        assert_eq!(normalize_plaintext("[Primeira Parte]"), "");
        assert_eq!(normalize_plaintext("x [Refrão] y"), "x  y");
    }

    #[test]
    fn noise_tokens_match_case_insensitively() {
        assert_eq!(normalize_plaintext("[INTRO]\nwords"), "words");
        assert_eq!(normalize_plaintext("[segunda parte]\nwords"), "words");
    }

    #[test]
    fn key_annotations_are_cut_to_end_of_line() {
        assert_eq!(
            normalize_plaintext("intro riff tom: Em (capo 2)\nwords"),
            "intro riff \nwords"
        );
        assert_eq!(normalize_plaintext("Tom: C"), "");
    }

    #[test]
    fn interior_blank_lines_survive_as_paragraph_breaks() {
        assert_eq!(
            normalize_plaintext("verse one\n\nverse two\n"),
            "verse one\n\nverse two"
        );
    }

    #[test]
    fn verse_and_chorus_markers_are_not_noise() {
        assert_eq!(
            normalize_plaintext("[Verse 1]\nwords"),
            "[Verse 1]\nwords"
        );
    }
}
