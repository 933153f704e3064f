//! # Rendering
//!
//! Two renderer-facing views of a [`Body`]:
//!
//! - [`chord_grid`] - one cell per lyric grapheme with the chord to draw above
//!   it. This is what a UI lays out as a two-row grid.
//! - [`render_text`] - plain monospaced text, chord row over lyric row.
//!
//! When several markers share an index the later one in the line wins.
//! Column math counts graphemes, so wide (CJK) characters are one column each.

use serde::Serialize;

use crate::body::{Body, Line};
use crate::grapheme::{graphemes, is_blank};

/// One column of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell<'a> {
    pub grapheme: &'a str,
    pub chord: Option<&'a str>,
}

/// Lay a line out as grapheme cells with their chords.
///
/// A marker at (or past) the end of the lyric gets one extra empty cell, so a
/// chord after the last character is still shown.
///
/// # Example
/// ```
/// use chordsheet::{chordpro::parse_line, render::chord_grid};
///
/// let line = parse_line("[G]主你[D]真美");
/// let grid = chord_grid(&line);
/// assert_eq!(grid.len(), 4);
/// assert_eq!(grid[2].grapheme, "真");
/// assert_eq!(grid[2].chord, Some("D"));
/// ```
pub fn chord_grid(line: &Line) -> Vec<GridCell<'_>> {
    let mut cells: Vec<GridCell<'_>> = graphemes(&line.lyric)
        .into_iter()
        .map(|grapheme| GridCell {
            grapheme,
            chord: None,
        })
        .collect();
    let lyric_len = cells.len();

    for marker in &line.chords {
        let index = marker.index.min(lyric_len);
        if index == cells.len() {
            cells.push(GridCell {
                grapheme: "",
                chord: None,
            });
        }
        cells[index].chord = Some(marker.chord.as_str());
    }
    cells
}

/// Build the chord row for a line, or `None` when the line has no chords.
fn chord_row(line: &Line) -> Option<String> {
    let mut row = String::new();
    let mut width = 0;

    for (column, cell) in chord_grid(line).iter().enumerate() {
        let Some(chord) = cell.chord else {
            continue;
        };
        // keep one space after the previous chord
        let start = if width == 0 { column } else { column.max(width + 1) };
        row.push_str(&" ".repeat(start - width));
        row.push_str(chord);
        width = start + chord.chars().count();
    }

    (!row.is_empty()).then_some(row)
}

/// Render a line as chord row over lyric row.
pub fn render_line(line: &Line) -> String {
    match chord_row(line) {
        Some(chords) if is_blank(&line.lyric) => chords,
        Some(chords) => format!("{}\n{}", chords, line.lyric),
        None => line.lyric.clone(),
    }
}

/// Render a whole body as plain text, sections separated by a blank line.
///
/// # Example
/// ```
/// use chordsheet::{chordpro::parse_text, render::render_text};
///
/// let body = parse_text("[C]Amazing [G]grace");
/// assert_eq!(render_text(&body), "C       G\nAmazing grace");
/// ```
pub fn render_text(body: &Body) -> String {
    body.sections
        .iter()
        .map(|section| {
            section
                .lines
                .iter()
                .map(render_line)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::ChordMarker;
    use crate::chordpro::{parse_line, parse_text};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grid_last_write_wins() {
        let line = Line {
            lyric: "ab".to_string(),
            chords: vec![ChordMarker::new(1, "C"), ChordMarker::new(1, "G")],
        };
        let grid = chord_grid(&line);
        assert_eq!(grid[0].chord, None);
        assert_eq!(grid[1].chord, Some("G"));
    }

    #[test]
    fn test_grid_trailing_chord_cell() {
        let line = parse_line("Hello[C]");
        let grid = chord_grid(&line);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[5], GridCell { grapheme: "", chord: Some("C") });
    }

    #[test]
    fn test_grid_out_of_range_marker_is_clamped() {
        let line = Line {
            lyric: "ab".to_string(),
            chords: vec![ChordMarker::new(9, "D")],
        };
        let grid = chord_grid(&line);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[2].chord, Some("D"));
    }

    #[test]
    fn test_grid_chord_only_line() {
        let line = parse_line("[G] [C]");
        let grid = chord_grid(&line);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], GridCell { grapheme: " ", chord: Some("G") });
        assert_eq!(grid[1], GridCell { grapheme: "", chord: Some("C") });
    }

    #[test]
    fn test_render_pushes_colliding_chords_apart() {
        let line = parse_line("[Cmaj7]a[G]b");
        assert_eq!(render_line(&line), "Cmaj7 G\nab");
    }

    #[test]
    fn test_render_text_sections() {
        let body = parse_text("[G]主你[D]真美\nno chords here\n\n[Em]Jesus");
        assert_eq!(render_text(&body), "G D\n主你真美\nno chords here\n\nEm\nJesus");
    }

    #[test]
    fn test_chord_only_line_has_no_lyric_row() {
        assert_eq!(render_line(&parse_line("[G]  [D]")), "G D");
    }
}
