//! Rendering to the canonical tag dialect.
//!
//! The output is what the surrounding application persists as the song
//! body. Pairs are rendered with the transposed chord when one is present,
//! which is how a transposition becomes permanent: transpose, serialize,
//! store. Re-parsing the result yields a song whose original chords carry
//! the transposed spellings and whose derived state is empty again.

use crate::song::{Item, Line, Song};

/// Render a song as canonical tag text.
pub fn serialize(song: &Song) -> String {
    let mut out = String::new();

    if let Some(title) = &song.title {
        out.push_str(&format!("{{title: {}}}\n", title));
    }
    if let Some(artist) = &song.artist {
        out.push_str(&format!("{{artist: {}}}\n", artist));
    }
    if let Some(key) = &song.key {
        out.push_str(&format!("{{key: {}}}\n", key));
    }
    if let Some(capo) = song.capo {
        out.push_str(&format!("{{capo: {}}}\n", capo));
    }
    let has_metadata = !out.is_empty();

    for (i, paragraph) in song.paragraphs.iter().enumerate() {
        if i > 0 || has_metadata {
            out.push('\n');
        }
        let tag = paragraph.kind.tag();
        if let Some(tag) = tag {
            out.push_str(&format!("{{start_of_{}}}\n", tag));
        }
        for line in &paragraph.lines {
            out.push_str(&render_line(line));
            out.push('\n');
        }
        if let Some(tag) = tag {
            out.push_str(&format!("{{end_of_{}}}\n", tag));
        }
    }
    out
}

fn render_line(line: &Line) -> String {
    let mut text = String::new();
    for item in &line.items {
        match item {
            Item::Pair {
                chord,
                transposed_chord,
                lyrics,
            } => {
                if let Some(chord) = transposed_chord.as_ref().or(chord.as_ref()) {
                    text.push_str(&format!("[{}]", chord));
                }
                text.push_str(lyrics);
            }
            Item::Comment { text: comment } => text.push_str(comment),
            Item::Directive { name, value } => {
                if value.is_empty() {
                    text.push_str(&format!("{{{}}}", name));
                } else {
                    text.push_str(&format!("{{{}: {}}}", name, value));
                }
            }
        }
    }
    text
}
