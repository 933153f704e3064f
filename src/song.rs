//! # Song Documents
//!
//! A song source file is body text with an optional YAML front matter block,
//! either at the top or at the bottom of the file:
//!
//! ```text
//! ---
//! title: 主你真美
//! artist: Unknown
//! language: zh
//! key: G
//! format: two-line
//! tab-width: 8
//! ---
//! G     D/F#   Em
//! 主你真美
//! ```
//!
//! ## Fields
//! | Field       | Values                      | Default    |
//! |-------------|-----------------------------|------------|
//! | `title`     | text                        | none       |
//! | `artist`    | text                        | none       |
//! | `language`  | `en`, `zh`, `mix`           | `mix`      |
//! | `key`       | `[A-G](#\|b)?m?`            | `G`        |
//! | `format`    | `two-line`, `chordpro`      | `two-line` |
//! | `tab-width` | integer `1..=32`            | `8`        |
//! | `id`        | storage identifier          | none       |
//!
//! Parsing only rejects malformed metadata. [`validate`] adds the checks a
//! song needs before it is stored (title present, key recognized).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::api::{build_body, InputMode};
use crate::body::Body;
use crate::chordpro::normalize_newlines;
use crate::error::SongError;
use crate::grapheme::is_blank;
use crate::key::Key;
use crate::transpose::transpose_body;
use crate::twoline::{DEFAULT_TAB_WIDTH, MAX_TAB_WIDTH};

/// Default original key for songs that do not declare one.
pub const DEFAULT_KEY: &str = "G";

/// Lyric language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
    #[default]
    Mix,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            "mix" => Some(Language::Mix),
            _ => None,
        }
    }
}

/// Front matter as written in the file.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    id: Option<String>,
    title: Option<String>,
    artist: Option<String>,
    language: Option<String>,
    key: Option<String>,
    format: Option<String>,
    tab_width: Option<usize>,
}

/// Song metadata after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub language: Language,
    pub original_key: String,
    pub format: InputMode,
    pub tab_width: usize,
}

impl Default for SongMetadata {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            artist: None,
            language: Language::default(),
            original_key: DEFAULT_KEY.to_string(),
            format: InputMode::default(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// A song record: metadata plus the structured body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(flatten)]
    pub metadata: SongMetadata,
    pub body: Body,
}

impl Song {
    /// The body as it reads in `to_key`. Borrowed when `to_key` is the
    /// original key.
    pub fn transposed(&self, to_key: &str) -> Cow<'_, Body> {
        transpose_body(&self.body, &self.metadata.original_key, to_key)
    }
}

/// Split the front matter block (between two `---` lines) from the body.
///
/// The block must open the file or close it; blank lines around it are
/// ignored. Returns `(front_matter, body_text)`.
///
/// ```text
/// ---            <- start (only blank lines before it)
/// title: X
/// ---            <- end
/// body...
/// ```
pub fn extract_front_matter(source: &str) -> (Option<String>, String) {
    let normalized = normalize_newlines(source);
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut markers = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i);
    let (Some(start), Some(end)) = (markers.next(), markers.next()) else {
        return (None, normalized);
    };

    let at_top = lines[..start].iter().all(|l| is_blank(l));
    let at_bottom = lines[end + 1..].iter().all(|l| is_blank(l));
    if !at_top && !at_bottom {
        return (None, normalized);
    }

    let front_matter = lines[start + 1..end].join("\n");
    let body: Vec<&str> = lines[..start]
        .iter()
        .chain(lines[end + 1..].iter())
        .copied()
        .collect();
    (Some(front_matter), body.join("\n"))
}

fn parse_metadata(content: &str) -> Result<SongMetadata, SongError> {
    let raw: RawMetadata = if content.trim().is_empty() {
        RawMetadata::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| SongError::MetadataError(e.to_string()))?
    };

    let language = match &raw.language {
        Some(l) => Language::from_str(l)
            .ok_or_else(|| SongError::MetadataError(format!("unknown language: {}", l)))?,
        None => Language::default(),
    };

    let format = match &raw.format {
        Some(f) => InputMode::from_str(f)
            .ok_or_else(|| SongError::MetadataError(format!("unknown format: {}", f)))?,
        None => InputMode::default(),
    };

    let tab_width = raw.tab_width.unwrap_or(DEFAULT_TAB_WIDTH);
    if !(1..=MAX_TAB_WIDTH).contains(&tab_width) {
        return Err(SongError::MetadataError(format!(
            "tab-width must be between 1 and {}, got {}",
            MAX_TAB_WIDTH, tab_width
        )));
    }

    Ok(SongMetadata {
        id: raw.id,
        title: raw.title,
        artist: raw.artist,
        language,
        original_key: raw
            .key
            .map(|k| k.trim().to_string())
            .unwrap_or_else(|| DEFAULT_KEY.to_string()),
        format,
        tab_width,
    })
}

/// Parse a song source file into metadata and body.
pub fn parse_song(source: &str) -> Result<Song, SongError> {
    parse_song_with(source, None, None)
}

/// Parse a song source file, letting the caller override the declared
/// `format` and `tab-width`.
pub fn parse_song_with(
    source: &str,
    format: Option<InputMode>,
    tab_width: Option<usize>,
) -> Result<Song, SongError> {
    let (front_matter, body_text) = extract_front_matter(source);
    let mut metadata = match front_matter {
        Some(content) => parse_metadata(&content)?,
        None => SongMetadata::default(),
    };
    if let Some(format) = format {
        metadata.format = format;
    }
    if let Some(width) = tab_width {
        metadata.tab_width = width;
    }
    let body = build_body(&body_text, metadata.format, metadata.tab_width);
    Ok(Song { metadata, body })
}

/// Check that a song is complete enough to store.
pub fn validate(song: &Song) -> Result<(), SongError> {
    let has_title = song
        .metadata
        .title
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    if !has_title {
        return Err(SongError::ValidationError("Title required.".to_string()));
    }
    if Key::parse(&song.metadata.original_key).is_none() {
        return Err(SongError::InvalidKey(song.metadata.original_key.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::ChordMarker;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_front_matter_at_top() {
        let source = "---\ntitle: Grace\nkey: C\nformat: chordpro\n---\n[C]Amazing [G]grace";
        let song = parse_song(source).unwrap();
        assert_eq!(song.metadata.title.as_deref(), Some("Grace"));
        assert_eq!(song.metadata.original_key, "C");
        assert_eq!(song.metadata.format, InputMode::ChordPro);
        assert_eq!(song.body.sections[0].lines[0].chords[1], ChordMarker::new(8, "G"));
    }

    #[test]
    fn test_front_matter_at_bottom() {
        let source = "C       G\nAmazing grace\n---\ntitle: Bottom\nlanguage: en\n---\n";
        let song = parse_song(source).unwrap();
        assert_eq!(song.metadata.title.as_deref(), Some("Bottom"));
        assert_eq!(song.metadata.language, Language::En);
        assert_eq!(song.body.sections[0].lines[0].lyric, "Amazing grace");
    }

    #[test]
    fn test_no_front_matter_uses_defaults() {
        let song = parse_song("G\n主你真美").unwrap();
        assert_eq!(song.metadata, SongMetadata::default());
        assert_eq!(song.body.sections[0].lines[0].chords, vec![ChordMarker::new(0, "G")]);
    }

    #[test]
    fn test_overrides_replace_declared_format() {
        let source = "---\nformat: two-line\n---\n[C]Hi";
        let song = parse_song_with(source, Some(InputMode::ChordPro), Some(4)).unwrap();
        assert_eq!(song.metadata.format, InputMode::ChordPro);
        assert_eq!(song.metadata.tab_width, 4);
        assert_eq!(song.body.sections[0].lines[0].lyric, "Hi");
    }

    #[test]
    fn test_dashes_inside_body_are_not_front_matter() {
        let (front, body) = extract_front_matter("a\n---\nb\n---\nc");
        assert_eq!(front, None);
        assert_eq!(body, "a\n---\nb\n---\nc");
    }

    #[test]
    fn test_empty_front_matter() {
        let song = parse_song("---\n---\n[C]Hi").unwrap();
        assert_eq!(song.metadata.original_key, DEFAULT_KEY);
    }

    #[test]
    fn test_bad_metadata() {
        assert!(matches!(parse_song("---\nlanguage: fr\n---\nx"), Err(SongError::MetadataError(_))));
        assert!(matches!(parse_song("---\nformat: tabs\n---\nx"), Err(SongError::MetadataError(_))));
        assert!(matches!(parse_song("---\ntab-width: 0\n---\nx"), Err(SongError::MetadataError(_))));
        assert!(matches!(parse_song("---\ntab-width: 33\n---\nx"), Err(SongError::MetadataError(_))));
        assert!(matches!(
            parse_song("---\ntab-width: 1099511627776\n---\nx"),
            Err(SongError::MetadataError(_))
        ));
        assert_eq!(parse_song("---\ntab-width: 32\n---\nx").unwrap().metadata.tab_width, 32);
        assert!(matches!(parse_song("---\ntitle: [unclosed\n---\nx"), Err(SongError::MetadataError(_))));
    }

    #[test]
    fn test_validate() {
        let song = parse_song("---\nkey: A\n---\nx").unwrap();
        assert!(matches!(validate(&song), Err(SongError::ValidationError(_))));

        let song = parse_song("---\ntitle: T\nkey: H\n---\nx").unwrap();
        assert!(matches!(validate(&song), Err(SongError::InvalidKey(k)) if k == "H"));

        let song = parse_song("---\ntitle: T\nkey: F#m\n---\nx").unwrap();
        assert!(validate(&song).is_ok());
    }

    #[test]
    fn test_song_record_json() {
        let song = parse_song("---\ntitle: T\nkey: A\nformat: chordpro\n---\n[A]la").unwrap();
        let json = serde_json::to_value(&song).unwrap();
        assert_eq!(json["title"], "T");
        assert_eq!(json["original_key"], "A");
        assert_eq!(json["language"], "mix");
        assert_eq!(json["body"]["sections"][0]["lines"][0]["chords"][0]["chord"], "A");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_transposed_borrows_in_original_key() {
        let song = parse_song("---\nkey: A\nformat: chordpro\n---\n[A]la [E]la").unwrap();
        assert!(matches!(song.transposed("A"), Cow::Borrowed(_)));
        assert_eq!(song.transposed("C").sections[0].lines[0].chords[1].chord, "G");
    }
}
