//! # Public API
//!
//! Entry points that chain the engine stages together.
//!
//! ## Pipeline
//! ```text
//! raw text ──(two-line mode)──> twoline::convert ──> ChordPro text
//!          ──(chordpro mode)──────────────────────────┘
//! ChordPro text ──> chordpro::parse_text ──> Body ──> transpose_body ──> render
//! ```
//!
//! ## Functions
//! - [`build_body()`] - raw text to [`Body`] in either input mode
//! - [`compile_song()`] - parse a song document and validate it
//! - [`compile_song_unchecked()`] - parse without validation (drafts)
//! - [`render_song()`] - transpose and render a song for display
//!
//! ## Typical Usage
//! ```rust
//! use chordsheet::{compile_song, render_song, Emit};
//!
//! let source = r#"---
//! title: Amazing Grace
//! key: G
//! ---
//! G       C
//! Amazing grace
//! "#;
//!
//! let song = compile_song(source)?;
//! let text = render_song(&song, Some("A"), Emit::Text)?;
//! assert_eq!(text, format!("A{}D\nAmazing grace", " ".repeat(11)));
//! # Ok::<(), chordsheet::SongError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::chordpro::{parse_text, to_chordpro};
use crate::error::SongError;
use crate::render::render_text;
use crate::song::{parse_song, validate, Song};
use crate::twoline::convert;

/// How raw input text annotates its chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Inline `[C]` markers
    #[serde(rename = "chordpro")]
    ChordPro,
    /// Chord row above lyric row
    #[default]
    #[serde(rename = "two-line")]
    TwoLine,
}

impl InputMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "chordpro" => Some(InputMode::ChordPro),
            "two-line" | "twoline" => Some(InputMode::TwoLine),
            _ => None,
        }
    }
}

/// Output format for [`render_song`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Body JSON
    #[default]
    Json,
    /// Chord rows over lyric rows
    Text,
    /// Inline `[C]` markers
    ChordPro,
}

impl Emit {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "json" => Some(Emit::Json),
            "text" => Some(Emit::Text),
            "chordpro" => Some(Emit::ChordPro),
            _ => None,
        }
    }
}

/// Build a song body from raw text.
///
/// `tab_width` is the default tab width for two-line input; it is ignored in
/// ChordPro mode.
///
/// # Example
/// ```rust
/// use chordsheet::{build_body, InputMode};
///
/// let body = build_body("C       G\nAmazing grace", InputMode::TwoLine, 8);
/// let line = &body.sections[0].lines[0];
/// assert_eq!(line.lyric, "Amazing grace");
/// assert_eq!(line.chords[1].index, 12);
/// ```
pub fn build_body(text: &str, mode: InputMode, tab_width: usize) -> Body {
    match mode {
        InputMode::ChordPro => parse_text(text),
        InputMode::TwoLine => parse_text(&convert(text, tab_width)),
    }
}

/// Parse a song document and validate it.
///
/// # Errors
/// Returns [`SongError`] for malformed front matter, a missing title or an
/// unrecognized key.
pub fn compile_song(source: &str) -> Result<Song, SongError> {
    let song = parse_song(source)?;
    validate(&song)?;
    Ok(song)
}

/// Parse a song document without validation (useful for drafts).
pub fn compile_song_unchecked(source: &str) -> Result<Song, SongError> {
    parse_song(source)
}

/// Render a song, optionally transposed to `to_key`.
///
/// The transposed body is only used for this output; the song is unchanged.
pub fn render_song(song: &Song, to_key: Option<&str>, emit: Emit) -> Result<String, SongError> {
    let body = match to_key {
        Some(key) => song.transposed(key),
        None => std::borrow::Cow::Borrowed(&song.body),
    };
    Ok(match emit {
        Emit::Json => body.to_json()?,
        Emit::Text => render_text(&body),
        Emit::ChordPro => to_chordpro(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "---\ntitle: Grace\nkey: G\n---\nG       C\nAmazing grace\n\nD\nHow sweet";

    #[test]
    fn test_build_body_modes_agree() {
        let two_line = build_body("G       C\nAmazing grace", InputMode::TwoLine, 8);
        let chordpro = build_body("[G]Amazing grac[C]e", InputMode::ChordPro, 8);
        assert_eq!(two_line, chordpro);
    }

    #[test]
    fn test_chordpro_mode_ignores_tab_width() {
        assert_eq!(
            build_body("[G]a\tb", InputMode::ChordPro, 2),
            build_body("[G]a\tb", InputMode::ChordPro, 12)
        );
    }

    #[test]
    fn test_render_song_chordpro_transposed() {
        let song = compile_song(SOURCE).unwrap();
        assert_eq!(
            render_song(&song, Some("A"), Emit::ChordPro).unwrap(),
            "[A]Amazing grac[D]e\n\n[E]How sweet"
        );
        assert_eq!(
            render_song(&song, None, Emit::ChordPro).unwrap(),
            "[G]Amazing grac[C]e\n\n[D]How sweet"
        );
    }

    #[test]
    fn test_render_song_json() {
        let song = compile_song(SOURCE).unwrap();
        let json = render_song(&song, Some("G"), Emit::Json).unwrap();
        assert_eq!(Body::from_json(&json).unwrap(), song.body);
    }

    #[test]
    fn test_compile_song_requires_title() {
        assert!(compile_song("C\nla").is_err());
        assert!(compile_song_unchecked("C\nla").is_ok());
    }

    #[test]
    fn test_input_mode_names() {
        assert_eq!(InputMode::from_str("twoline"), Some(InputMode::TwoLine));
        assert_eq!(InputMode::from_str("two-line"), Some(InputMode::TwoLine));
        assert_eq!(InputMode::from_str("chordpro"), Some(InputMode::ChordPro));
        assert_eq!(InputMode::from_str("abc"), None);
        assert_eq!(serde_json::to_string(&InputMode::TwoLine).unwrap(), "\"two-line\"");
    }
}
