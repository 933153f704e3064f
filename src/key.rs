//! # Keys and Note Spelling
//!
//! A [`Key`] is just a root note with an optional minor marker (`G`, `Bb`,
//! `F#m`). It decides two things during transposition: the pitch class used to
//! measure the semitone distance, and whether notes are spelled from the sharp
//! or the flat chromatic scale. There is no key-signature model here.

use std::fmt;

/// Chromatic scale spelled with sharps, indexed by pitch class (C = 0).
pub const SHARP_SCALE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic scale spelled with flats, indexed by pitch class (C = 0).
pub const FLAT_SCALE: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Keys whose chords are spelled from [`FLAT_SCALE`]. Every other key uses sharps.
const FLAT_KEYS: [&str; 15] = [
    "F", "Bb", "Eb", "Ab", "Db", "Gb", // major
    "Dm", "Gm", "Cm", "Fm", "Bbm", "Ebm", "Abm", "Dbm", "Gbm", // minor
];

/// Flat/sharp pairs naming the same pitch.
const ENHARMONICS: [(&str, &str); 5] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
];

/// Keys offered as transposition targets.
pub const SELECTABLE_KEYS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

/// The enharmonic twin of a note (`Db` <-> `C#`), if it has one in the table.
pub fn enharmonic(note: &str) -> Option<&'static str> {
    ENHARMONICS.iter().find_map(|&(flat, sharp)| {
        if note == flat {
            Some(sharp)
        } else if note == sharp {
            Some(flat)
        } else {
            None
        }
    })
}

/// Position of `note` in `scale`, falling back to its enharmonic spelling.
///
/// # Example
/// ```
/// use chordsheet::key::{note_index, FLAT_SCALE, SHARP_SCALE};
///
/// assert_eq!(note_index("Eb", &SHARP_SCALE), Some(3));
/// assert_eq!(note_index("D#", &FLAT_SCALE), Some(3));
/// assert_eq!(note_index("E#", &SHARP_SCALE), None);
/// ```
pub fn note_index(note: &str, scale: &[&str; 12]) -> Option<usize> {
    scale
        .iter()
        .position(|&n| n == note)
        .or_else(|| enharmonic(note).and_then(|twin| scale.iter().position(|&n| n == twin)))
}

/// A musical key: root note plus optional minor marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub root: String,
    pub minor: bool,
}

impl Key {
    /// Parse a key name of the form `[A-G](#|b)?m?`, e.g. `G`, `Bb`, `F#m`.
    ///
    /// Returns `None` for anything else, including roots that do not exist on
    /// either chromatic scale (`E#`, `Cb`).
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let (root, minor) = match trimmed.strip_suffix('m') {
            Some(root) => (root, true),
            None => (trimmed, false),
        };
        let valid_shape = matches!(
            root.as_bytes(),
            [b'A'..=b'G'] | [b'A'..=b'G', b'#' | b'b']
        );
        if !valid_shape || note_index(root, &SHARP_SCALE).is_none() {
            return None;
        }
        Some(Self {
            root: root.to_string(),
            minor,
        })
    }

    /// Whether chords in this key are spelled with flats.
    pub fn uses_flats(&self) -> bool {
        FLAT_KEYS.contains(&self.to_string().as_str())
    }

    /// The chromatic scale used to spell notes in this key.
    pub fn scale(&self) -> &'static [&'static str; 12] {
        if self.uses_flats() {
            &FLAT_SCALE
        } else {
            &SHARP_SCALE
        }
    }

    /// Pitch class of the key's root (C = 0).
    pub fn pitch_class(&self) -> usize {
        // Key::parse only accepts roots that resolve on the sharp scale.
        note_index(&self.root, self.scale()).unwrap_or(0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, if self.minor { "m" } else { "" })
    }
}
