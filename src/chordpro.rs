//! # ChordPro Parser
//!
//! Turns inline-annotated text (`[C]Amazing [G]grace`) into a [`Body`].
//!
//! ## Rules
//! - `[` starts a chord only if a `]` follows on the same line; otherwise it
//!   is kept as a literal character.
//! - The trimmed text between the brackets is the chord. `[]` and `[  ]` are
//!   removed without producing a marker.
//! - A marker's index is the grapheme length of the lyric produced so far.
//! - CRLF and lone CR become LF before the text is split into lines.
//! - Blank lines separate sections; sections that end up with no lines are
//!   dropped.
//!
//! Parsing never fails: malformed input degrades to literal text.
//!
//! ## Example
//! ```rust
//! use chordsheet::chordpro::parse_line;
//!
//! let line = parse_line("[C]Amazing [G]grace");
//! assert_eq!(line.lyric, "Amazing grace");
//! assert_eq!(line.chords[1].index, 8);
//! assert_eq!(line.chords[1].chord, "G");
//! ```

use crate::body::{Body, ChordMarker, Line, Section};
use crate::grapheme::{grapheme_len, is_blank};

/// Replace CRLF and lone CR with LF.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Parse a single ChordPro line into its lyric and chord markers.
pub fn parse_line(line: &str) -> Line {
    let mut lyric = String::with_capacity(line.len());
    let mut chords = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(']') else {
            // No closing bracket anywhere on the line: the rest is literal text
            break;
        };
        lyric.push_str(&rest[..open]);
        let chord = after_open[..close].trim();
        if !chord.is_empty() {
            chords.push(ChordMarker::new(grapheme_len(&lyric), chord));
        }
        rest = &after_open[close + 1..];
    }
    lyric.push_str(rest);

    Line { lyric, chords }
}

/// Parse ChordPro text into sections of lines.
///
/// # Example
/// ```rust
/// use chordsheet::chordpro::parse_text;
///
/// let body = parse_text("[C]Hello\n\n[D]World");
/// assert_eq!(body.sections.len(), 2);
/// assert_eq!(body.sections[1].lines[0].lyric, "World");
/// ```
pub fn parse_text(text: &str) -> Body {
    let normalized = normalize_newlines(text);
    let mut sections = vec![Section::verse()];

    for raw in normalized.split('\n') {
        if is_blank(raw) {
            sections.push(Section::verse());
            continue;
        }
        if let Some(current) = sections.last_mut() {
            current.lines.push(parse_line(raw));
        }
    }

    sections.retain(|s| !s.lines.is_empty());
    Body { sections }
}

/// Render a line back to ChordPro, inserting markers into the lyric.
///
/// Markers may come in any order. Markers sharing an index keep their
/// relative order.
pub fn line_to_chordpro(line: &Line) -> String {
    let graphemes = crate::grapheme::graphemes(&line.lyric);
    let mut out = String::with_capacity(line.lyric.len() + line.chords.len() * 4);
    let mut sorted: Vec<&ChordMarker> = line.chords.iter().collect();
    sorted.sort_by_key(|m| m.index);
    let mut markers = sorted.into_iter().peekable();

    for (i, g) in graphemes.iter().enumerate() {
        while let Some(marker) = markers.next_if(|m| m.index <= i) {
            out.push('[');
            out.push_str(&marker.chord);
            out.push(']');
        }
        out.push_str(g);
    }
    for marker in markers {
        out.push('[');
        out.push_str(&marker.chord);
        out.push(']');
    }
    out
}

/// Serialize a body back to ChordPro text, one blank line between sections.
pub fn to_chordpro(body: &Body) -> String {
    body.sections
        .iter()
        .map(|section| {
            section
                .lines
                .iter()
                .map(line_to_chordpro)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
