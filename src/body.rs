//! # Song Body Types
//!
//! The structured form of a song body, shared with renderers and storage.
//!
//! ## Type Hierarchy
//! ```text
//! Body
//!   └── Vec<Section>              (split at blank lines, never empty)
//!         ├── kind: SectionKind   (serialized as "type")
//!         └── Vec<Line>
//!               ├── lyric: String
//!               └── Vec<ChordMarker>
//!                     ├── index: usize   (grapheme offset into lyric)
//!                     └── chord: String
//! ```
//!
//! ## JSON Shape
//! ```json
//! { "sections": [ { "type": "verse",
//!     "lines": [ { "lyric": "Amazing grace",
//!                  "chords": [ { "index": 0, "chord": "C" } ] } ] } ] }
//! ```
//!
//! ## Marker Indices
//! `index` counts extended grapheme clusters of the line's own lyric and may
//! equal the lyric length (a chord after the last character). Several markers
//! may share an index; renderers let the later marker win.

use serde::{Deserialize, Serialize};

/// A chord attached to a grapheme position in a lyric line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordMarker {
    pub index: usize,
    pub chord: String,
}

impl ChordMarker {
    pub fn new(index: usize, chord: impl Into<String>) -> Self {
        Self {
            index,
            chord: chord.into(),
        }
    }
}

/// One lyric line with its chords.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    pub lyric: String,
    #[serde(default)]
    pub chords: Vec<ChordMarker>,
}

/// Section type tag. Only verses exist for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Verse,
}

/// A run of lines between blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Section {
    pub fn verse() -> Self {
        Self::default()
    }
}

/// A whole song body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Body {
    /// Decode a body from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Every line in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.sections.iter().flat_map(|s| s.lines.iter())
    }

    /// Every chord marker in reading order, for in-place rewriting.
    pub fn markers_mut(&mut self) -> impl Iterator<Item = &mut ChordMarker> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.lines.iter_mut())
            .flat_map(|l| l.chords.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Body {
        Body {
            sections: vec![Section {
                kind: SectionKind::Verse,
                lines: vec![Line {
                    lyric: "Amazing grace".to_string(),
                    chords: vec![ChordMarker::new(0, "C"), ChordMarker::new(8, "G")],
                }],
            }],
        }
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"sections":[{"type":"verse","lines":[{"lyric":"Amazing grace","chords":[{"index":0,"chord":"C"},{"index":8,"chord":"G"}]}]}]}"#
        );
    }

    #[test]
    fn test_from_json_tolerates_missing_chords() {
        let body = Body::from_json(r#"{"sections":[{"type":"verse","lines":[{"lyric":"Hi"}]}]}"#).unwrap();
        assert!(body.sections[0].lines[0].chords.is_empty());
        assert_eq!(Body::from_json(&sample().to_json().unwrap()).unwrap(), sample());
    }

    #[test]
    fn test_unknown_section_type_is_rejected() {
        assert!(Body::from_json(r#"{"sections":[{"type":"bridge","lines":[]}]}"#).is_err());
    }

    #[test]
    fn test_markers_mut_visits_every_marker() {
        let mut body = sample();
        for marker in body.markers_mut() {
            marker.chord.push('7');
        }
        let chords: Vec<&str> = body.lines().flat_map(|l| l.chords.iter()).map(|c| c.chord.as_str()).collect();
        assert_eq!(chords, vec!["C7", "G7"]);
    }
}
