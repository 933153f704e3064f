//! # Chord Transposer
//!
//! Moves chords from one key to another. Only the root of each chord is
//! rewritten; the rest of the symbol (quality, extensions, slash bass) is
//! carried over untouched, so `D/F#` from G to A becomes `E/F#`.
//!
//! Anything that cannot be resolved (a chord without a root letter, an
//! unknown key) is returned unchanged. Nothing here fails.

use std::borrow::Cow;

use log::debug;

use crate::body::Body;
use crate::chord::split_root;
use crate::key::{note_index, Key};

/// Semitones to move up when going from `from` to `to` (0..12).
fn semitone_delta(from: &Key, to: &Key) -> usize {
    (to.pitch_class() + 12 - from.pitch_class()) % 12
}

/// Whether two key names refer to the same key as written, ignoring the
/// surrounding whitespace that [`Key::parse`] also ignores.
pub fn same_key(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

/// Transpose one chord symbol from `from_key` to `to_key`.
///
/// Equal key names (see [`same_key`]) return the chord as-is, without
/// respelling.
///
/// # Example
/// ```
/// use chordsheet::transpose::transpose_chord;
///
/// assert_eq!(transpose_chord("G", "G", "A"), "A");
/// assert_eq!(transpose_chord("D", "G", "F"), "C");
/// assert_eq!(transpose_chord("Em7", "G", "Bb"), "Gm7");
/// assert_eq!(transpose_chord("N.C.", "G", "A"), "N.C.");
/// ```
pub fn transpose_chord(chord: &str, from_key: &str, to_key: &str) -> String {
    if same_key(from_key, to_key) {
        return chord.to_string();
    }
    let (Some(from), Some(to)) = (Key::parse(from_key), Key::parse(to_key)) else {
        debug!("cannot transpose {:?}: unknown key {:?} or {:?}", chord, from_key, to_key);
        return chord.to_string();
    };
    let Some((root, rest)) = split_root(chord) else {
        debug!("cannot transpose {:?}: no root note", chord);
        return chord.to_string();
    };
    let Some(root_index) = note_index(root, from.scale()) else {
        debug!("cannot transpose {:?}: unknown root {:?}", chord, root);
        return chord.to_string();
    };

    let new_root = to.scale()[(root_index + semitone_delta(&from, &to)) % 12];
    format!("{}{}", new_root, rest)
}

/// Transpose every chord in a body.
///
/// When the key names are equal the body is handed back borrowed, the very
/// same value the caller passed in. Otherwise a deep copy is made and its
/// chords are rewritten; the input is never touched.
///
/// # Example
/// ```
/// use std::borrow::Cow;
/// use chordsheet::{chordpro::parse_text, transpose::transpose_body};
///
/// let body = parse_text("[G]Amazing [C]grace");
/// assert!(matches!(transpose_body(&body, "G", "G"), Cow::Borrowed(_)));
///
/// let up = transpose_body(&body, "G", "A");
/// assert_eq!(up.sections[0].lines[0].chords[1].chord, "D");
/// assert_eq!(body.sections[0].lines[0].chords[1].chord, "C");
/// ```
pub fn transpose_body<'a>(body: &'a Body, from_key: &str, to_key: &str) -> Cow<'a, Body> {
    if same_key(from_key, to_key) {
        return Cow::Borrowed(body);
    }

    let mut next = body.clone();
    for marker in next.markers_mut() {
        marker.chord = transpose_chord(&marker.chord, from_key, to_key);
    }
    Cow::Owned(next)
}
