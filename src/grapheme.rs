//! # Grapheme Index Model
//!
//! Every chord position in this crate is a 0-based offset into the extended
//! grapheme clusters of a lyric string. A combining accent, a flag emoji or a
//! CJK character each count as exactly one index, so a chord placed on `é`
//! stays on `é` no matter how the character is encoded.
//!
//! Renderers must segment lyrics the same way (Unicode extended grapheme
//! clusters) to place chords in the right column.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into extended grapheme clusters.
pub fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Number of grapheme clusters in `text`.
///
/// # Example
/// ```
/// use chordsheet::grapheme::grapheme_len;
///
/// assert_eq!(grapheme_len("grace"), 5);
/// assert_eq!(grapheme_len("主你真美"), 4);
/// assert_eq!(grapheme_len("e\u{301}"), 1);
/// ```
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Index of the last non-whitespace grapheme, or `None` for blank text.
pub fn last_visible_index(text: &str) -> Option<usize> {
    text.graphemes(true)
        .enumerate()
        .filter(|(_, g)| !is_blank(g))
        .map(|(i, _)| i)
        .last()
}

/// True for empty text or text made only of whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Insert `insert` before the grapheme at `index` (or append when `index`
/// is at or past the end).
pub fn insert_at(text: &str, index: usize, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + insert.len());
    let mut inserted = false;
    for (i, g) in text.graphemes(true).enumerate() {
        if i == index {
            out.push_str(insert);
            inserted = true;
        }
        out.push_str(g);
    }
    if !inserted {
        out.push_str(insert);
    }
    out
}
