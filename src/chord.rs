//! # Chord Symbol Grammar
//!
//! A small lexer for chord rows such as `G     D/F#   Em7`.
//!
//! ## Grammar
//! ```text
//! chord   := root quality? bass?
//! root    := [A-G] ('#' | 'b')?
//! quality := one entry of Quality::ALL (longest match wins)
//! bass    := '/' root
//! ```
//!
//! Text that does not start a chord is skipped, so stray words in a chord row
//! are ignored rather than rejected. Columns are grapheme offsets into the
//! scanned row.

use crate::grapheme::{grapheme_len, graphemes};

/// Chord quality / extension vocabulary recognized in chord rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    HalfDiminished, // m7b5
    MajorSeventh,   // maj7
    MajorNinth,     // maj9
    Sus2,
    Sus4,
    Add9,
    Diminished,     // dim
    Augmented,      // aug
    MinorSeventh,   // m7
    Eleventh,       // 11
    Thirteenth,     // 13
    Minor,          // m
    Seventh,        // 7
    Ninth,          // 9
}

impl Quality {
    /// Every quality, ordered so that no entry is a prefix of a later one.
    pub const ALL: [Quality; 14] = [
        Quality::HalfDiminished,
        Quality::MajorSeventh,
        Quality::MajorNinth,
        Quality::Sus2,
        Quality::Sus4,
        Quality::Add9,
        Quality::Diminished,
        Quality::Augmented,
        Quality::MinorSeventh,
        Quality::Eleventh,
        Quality::Thirteenth,
        Quality::Minor,
        Quality::Seventh,
        Quality::Ninth,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Quality::HalfDiminished => "m7b5",
            Quality::MajorSeventh => "maj7",
            Quality::MajorNinth => "maj9",
            Quality::Sus2 => "sus2",
            Quality::Sus4 => "sus4",
            Quality::Add9 => "add9",
            Quality::Diminished => "dim",
            Quality::Augmented => "aug",
            Quality::MinorSeventh => "m7",
            Quality::Eleventh => "11",
            Quality::Thirteenth => "13",
            Quality::Minor => "m",
            Quality::Seventh => "7",
            Quality::Ninth => "9",
        }
    }
}

/// A chord recognized in a chord row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordToken {
    /// Full matched text, e.g. `D/F#`
    pub symbol: String,
    /// Grapheme column where the chord starts in the scanned row
    pub column: usize,
    pub root: String,
    pub quality: Option<Quality>,
    pub bass: Option<String>,
}

fn grapheme_is(g: &str, c: char) -> bool {
    let mut chars = g.chars();
    chars.next() == Some(c) && chars.next().is_none()
}

fn is_root_letter(g: &str) -> bool {
    matches!(g, "A" | "B" | "C" | "D" | "E" | "F" | "G")
}

/// Match `root` at `pos`, returning the number of graphemes consumed.
fn match_root(gs: &[&str], pos: usize) -> usize {
    match gs.get(pos) {
        Some(g) if is_root_letter(g) => {}
        _ => return 0,
    }
    match gs.get(pos + 1) {
        Some(g) if grapheme_is(g, '#') || grapheme_is(g, 'b') => 2,
        _ => 1,
    }
}

fn matches_literal(gs: &[&str], pos: usize, literal: &str) -> bool {
    literal
        .chars()
        .enumerate()
        .all(|(i, c)| gs.get(pos + i).is_some_and(|g| grapheme_is(g, c)))
}

fn match_quality(gs: &[&str], pos: usize) -> Option<Quality> {
    Quality::ALL
        .into_iter()
        .find(|q| matches_literal(gs, pos, q.symbol()))
}

/// Try to read one chord starting at `pos`.
fn match_chord(gs: &[&str], pos: usize) -> Option<ChordToken> {
    let root_len = match_root(gs, pos);
    if root_len == 0 {
        return None;
    }
    let root = gs[pos..pos + root_len].concat();
    let mut end = pos + root_len;

    let quality = match_quality(gs, end);
    if let Some(q) = quality {
        end += q.symbol().len();
    }

    let mut bass = None;
    if gs.get(end).is_some_and(|g| grapheme_is(g, '/')) {
        let bass_len = match_root(gs, end + 1);
        if bass_len > 0 {
            bass = Some(gs[end + 1..end + 1 + bass_len].concat());
            end += 1 + bass_len;
        }
    }

    Some(ChordToken {
        symbol: gs[pos..end].concat(),
        column: pos,
        root,
        quality,
        bass,
    })
}

/// Scan a chord row left to right and return every chord with its column.
///
/// # Example
/// ```
/// use chordsheet::chord::scan_row;
///
/// let tokens = scan_row("G     D/F#   Em7");
/// let found: Vec<(&str, usize)> = tokens.iter().map(|t| (t.symbol.as_str(), t.column)).collect();
/// assert_eq!(found, vec![("G", 0), ("D/F#", 6), ("Em7", 13)]);
/// ```
pub fn scan_row(row: &str) -> Vec<ChordToken> {
    let gs = graphemes(row);
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < gs.len() {
        match match_chord(&gs, pos) {
            Some(token) => {
                pos += grapheme_len(&token.symbol);
                tokens.push(token);
            }
            None => pos += 1,
        }
    }
    tokens
}

/// Split a chord symbol into its root (`[A-G](#|b)?`) and the untouched rest.
///
/// Returns `None` when the symbol does not start with a root letter.
///
/// # Example
/// ```
/// use chordsheet::chord::split_root;
///
/// assert_eq!(split_root("Bbm7"), Some(("Bb", "m7")));
/// assert_eq!(split_root("D/F#"), Some(("D", "/F#")));
/// assert_eq!(split_root("N.C."), None);
/// ```
pub fn split_root(chord: &str) -> Option<(&str, &str)> {
    let mut chars = chord.char_indices();
    match chars.next() {
        Some((_, 'A'..='G')) => {}
        _ => return None,
    }
    let split = match chars.next() {
        Some((i, '#' | 'b')) => i + 1,
        Some((i, _)) => i,
        None => chord.len(),
    };
    Some(chord.split_at(split))
}
