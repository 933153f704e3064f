//! # Two-Line Converter
//!
//! Converts "chords over lyrics" text into ChordPro:
//!
//! ```text
//! C       G
//! Amazing grace        =>   [C]Amazing grac[G]e
//! ```
//!
//! ## Pairing
//! Lines are consumed as (chord row, lyric row) pairs. A pair is accepted only
//! when both rows exist and are non-blank; otherwise the current line is
//! emitted unchanged as plain text and the scan moves on by one line. Blank
//! lines therefore survive and still separate sections downstream.
//!
//! ## Alignment
//! Pasted text is rarely aligned: tabs have unknown width and CJK lyrics are
//! visually wider than the monospaced chord row. For each pair:
//!
//! 1. **Tab width** - if tabs precede the last chord, pick the width that puts
//!    that chord over the last lyric character, clamped to 3..=12. Otherwise
//!    use the caller's default.
//! 2. **Normalize** - expand tabs, turn NBSP / full-width spaces into spaces,
//!    strip trailing whitespace from the lyric.
//! 3. **Tokenize** - scan the chord row with [`crate::chord::scan_row`].
//! 4. **Map** - `index = round(column * last_lyric_index / last_chord_column)`,
//!    clamped to the lyric. The last chord always lands on the last character
//!    and earlier chords are spread proportionally.
//! 5. **Insert** - `[Chord]` markers go in right to left so earlier indices
//!    stay valid.
//!
//! ## Related Modules
//! - `chord` - chord row grammar
//! - `chordpro` - parses the produced text

use log::{debug, trace};

use crate::chord::{scan_row, ChordToken};
use crate::chordpro::normalize_newlines;
use crate::grapheme::{graphemes, is_blank, last_visible_index};

/// Tab width used when none can be inferred and the caller has no preference.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Bounds applied to an inferred tab width.
pub const MIN_INFERRED_TAB_WIDTH: usize = 3;
pub const MAX_INFERRED_TAB_WIDTH: usize = 12;

/// Largest tab width accepted from callers. Wider requests are capped.
pub const MAX_TAB_WIDTH: usize = 32;

/// Space characters that word processors and CJK input methods paste in
/// place of plain spaces.
const WIDE_SPACES: [char; 3] = ['\u{00A0}', '\u{202F}', '\u{3000}'];

/// Replace non-breaking and full-width spaces with ordinary spaces.
pub fn normalize_spaces(text: &str) -> String {
    text.chars()
        .map(|c| if WIDE_SPACES.contains(&c) { ' ' } else { c })
        .collect()
}

/// Replace every tab with `width` spaces, at most [`MAX_TAB_WIDTH`].
pub fn expand_tabs(text: &str, width: usize) -> String {
    text.replace('\t', &" ".repeat(width.min(MAX_TAB_WIDTH)))
}

/// Clean up pasted text without any chord alignment: tabs become spaces,
/// NBSP / full-width spaces become plain spaces, line endings become `\n` and
/// trailing whitespace is dropped from every line.
///
/// # Example
/// ```
/// use chordsheet::twoline::cleanup_paste;
///
/// assert_eq!(cleanup_paste("G\tD\u{a0}\r\n主你\u{3000}真美 \r\n", 4), "G    D\n主你 真美\n");
/// ```
pub fn cleanup_paste(text: &str, tab_width: usize) -> String {
    normalize_newlines(text)
        .split('\n')
        .map(|line| expand_tabs(&normalize_spaces(line), tab_width).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Work out the tab width that makes the chord row line up with the lyric row.
///
/// Only tabs before the last chord matter. If there are none, or the lyric
/// row is blank, `default_width` is returned unchanged (it is not clamped).
pub fn infer_tab_width(chord_row: &str, lyric_row: &str, default_width: usize) -> usize {
    let chord_row = normalize_spaces(chord_row);
    let Some(last) = scan_row(&chord_row).pop() else {
        return default_width;
    };

    let tabs = graphemes(&chord_row)[..last.column]
        .iter()
        .filter(|g| **g == "\t")
        .count();
    if tabs == 0 {
        return default_width;
    }

    let lyric = expand_tabs(&normalize_spaces(lyric_row), default_width);
    let Some(last_lyric) = last_visible_index(&lyric) else {
        return default_width;
    };

    let non_tab = last.column - tabs;
    let width = ((last_lyric as f64 - non_tab as f64) / tabs as f64)
        .round()
        .clamp(MIN_INFERRED_TAB_WIDTH as f64, MAX_INFERRED_TAB_WIDTH as f64) as usize;

    debug!(
        "inferred tab width {} ({} tabs before {:?} at column {}, last lyric index {})",
        width, tabs, last.symbol, last.column, last_lyric
    );
    width
}

/// Map chord columns onto lyric grapheme indices.
///
/// Returns `(index, chord)` pairs in the same order as `tokens`.
fn map_columns(tokens: &[ChordToken], last_lyric: usize) -> Vec<(usize, &str)> {
    let last_column = tokens.last().map_or(0, |t| t.column);
    let scale = if last_column > 0 {
        last_lyric as f64 / last_column as f64
    } else {
        1.0
    };

    tokens
        .iter()
        .map(|t| {
            let index = ((t.column as f64 * scale).round() as usize).min(last_lyric);
            (index, t.symbol.as_str())
        })
        .collect()
}

/// Merge one chord row into its lyric row as a ChordPro line.
pub fn convert_pair(chord_row: &str, lyric_row: &str, default_tab_width: usize) -> String {
    let tab_width = infer_tab_width(chord_row, lyric_row, default_tab_width);
    let chord_row = expand_tabs(&normalize_spaces(chord_row), tab_width);
    let lyric_row = expand_tabs(&normalize_spaces(lyric_row), tab_width);
    let lyric = lyric_row.trim_end();

    let tokens = scan_row(&chord_row);
    let Some(last_lyric) = last_visible_index(lyric) else {
        return lyric.to_string();
    };

    let mut cells: Vec<String> = graphemes(lyric).into_iter().map(str::to_string).collect();
    for (index, chord) in map_columns(&tokens, last_lyric).into_iter().rev() {
        cells.insert(index, format!("[{}]", chord));
    }
    cells.concat()
}

/// Convert two-line (chords over lyrics) text into ChordPro text.
///
/// Never fails; lines that do not form a pair pass through unchanged.
///
/// # Example
/// ```
/// use chordsheet::twoline::convert;
///
/// assert_eq!(convert("C       G\nAmazing grace", 8), "[C]Amazing grac[G]e");
/// ```
pub fn convert(text: &str, default_tab_width: usize) -> String {
    let normalized = normalize_newlines(text);
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let chord_row = lines[i];
        match lines.get(i + 1) {
            Some(lyric_row) if !is_blank(chord_row) && !is_blank(lyric_row) => {
                out.push(convert_pair(chord_row, lyric_row, default_tab_width));
                i += 2;
            }
            _ => {
                if !is_blank(chord_row) {
                    trace!("line {} has no partner, kept as plain text", i + 1);
                }
                out.push(chord_row.to_string());
                i += 1;
            }
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chordpro::parse_text;
    use crate::grapheme::grapheme_len;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_proportional_mapping() {
        // scale = 12 / 8 = 1.5, so G at column 8 lands on index 12
        assert_eq!(convert_pair("C       G", "Amazing grace", 8), "[C]Amazing grac[G]e");
    }

    #[test]
    fn test_cjk_lyric_is_narrower_than_chord_row() {
        // chords at columns 0, 6, 13 over four characters (last index 3)
        assert_eq!(
            convert_pair("G     D/F#   Em", "主你真美", 8),
            "[G]主[D/F#]你真[Em]美"
        );
    }

    #[test]
    fn test_single_chord_at_column_zero() {
        assert_eq!(convert_pair("Am", "Hello there", 8), "[Am]Hello there");
    }

    #[test]
    fn test_trailing_lyric_spaces_do_not_count() {
        assert_eq!(convert_pair("C       G", "Amazing grace   ", 8), "[C]Amazing grac[G]e");
        assert_eq!(convert_pair("C       G", "Amazing grace\u{3000}", 8), "[C]Amazing grac[G]e");
    }

    #[test]
    fn test_chord_row_without_chords_keeps_lyric() {
        assert_eq!(convert_pair("x  y", "lyric", 8), "lyric");
    }

    #[test]
    fn test_infer_tab_width() {
        // (12 - 1) / 2 = 5.5, rounds to 6
        assert_eq!(infer_tab_width("C\t\tG", "Amazing grace", 8), 6);
    }

    #[rstest]
    #[case("C\tG", "ab", 3)]
    #[case("C\tG", "a much longer lyric line than the tab", 12)]
    fn test_inferred_width_is_clamped(#[case] chords: &str, #[case] lyric: &str, #[case] expected: usize) {
        assert_eq!(infer_tab_width(chords, lyric, 8), expected);
    }

    #[rstest]
    #[case("C       G")]
    #[case("G\t")]
    #[case("   ")]
    fn test_default_width_without_leading_tabs(#[case] chords: &str) {
        assert_eq!(infer_tab_width(chords, "Amazing grace", 5), 5);
    }

    #[test]
    fn test_tabbed_pair_aligns_last_chord() {
        assert_eq!(convert_pair("C\t\tG", "Amazing grace", 8), "[C]Amazing grac[G]e");
        assert_eq!(convert_pair("C\tG", "ab", 8), "[C]a[G]b");
    }

    #[test]
    fn test_tab_width_moves_middle_chord() {
        // (24 - 6) / 4 = 4.5 rounds to 5, so G sits at column 10 of 26
        assert_eq!(
            convert_pair("Cmaj7\tG\t\t\tD", "abcdefghijklmnopqrstuvwxy", 8),
            "[Cmaj7]abcdefghi[G]jklmnopqrstuvwx[D]y"
        );
        // the same row with 8-wide tabs: G at column 13 of 38
        let spaced = format!("Cmaj7{}G{}D", " ".repeat(8), " ".repeat(24));
        assert_eq!(
            convert_pair(&spaced, "abcdefghijklmnopqrstuvwxy", 8),
            "[Cmaj7]abcdefgh[G]ijklmnopqrstuvwx[D]y"
        );
    }

    #[test]
    fn test_expand_tabs_caps_width() {
        assert_eq!(expand_tabs("a\tb", usize::MAX), format!("a{}b", " ".repeat(MAX_TAB_WIDTH)));
        assert_eq!(expand_tabs("a\tb", 1 << 40), expand_tabs("a\tb", MAX_TAB_WIDTH));
    }

    #[rstest]
    #[case(usize::MAX)]
    #[case(1 << 40)]
    #[case(MAX_TAB_WIDTH + 1)]
    fn test_huge_default_width_still_converts(#[case] width: usize) {
        assert_eq!(convert("C\tG\nab\tc", width), convert("C\tG\nab\tc", MAX_TAB_WIDTH));
        assert_eq!(cleanup_paste("x\ty", width), format!("x{}y", " ".repeat(MAX_TAB_WIDTH)));
    }

    #[test]
    fn test_convert_pairs_and_blank_lines() {
        let text = "C       G\nAmazing grace\n\nD\nHow sweet";
        assert_eq!(convert(text, 8), "[C]Amazing grac[G]e\n\n[D]How sweet");
    }

    #[test]
    fn test_single_line_fallback() {
        // trailing chord row with no lyric, and a lyric row preceded by a blank line
        assert_eq!(convert("Intro\n\nG  C", 8), "Intro\n\nG  C");
        assert_eq!(convert("G\n\nla la", 8), "G\n\nla la");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(convert("C       G\r\nAmazing grace\r\n", 8), "[C]Amazing grac[G]e\n");
    }

    #[rstest]
    #[case("C       G\nAmazing grace")]
    #[case("G     D/F#   Em\n主你真美\n\nC     G/B    Am7   D7\nJesus, You are beautiful")]
    #[case("\tC\t\tG\tAm\tF\nshort")]
    #[case("C G Am F Dm G7 C\nx")]
    #[case("Em\u{a0}\u{a0}\u{a0}C\n\u{3000}👨‍👩‍👧 e\u{301}")]
    fn test_marker_indices_stay_in_bounds(#[case] text: &str) {
        let body = parse_text(&convert(text, 8));
        for line in body.lines() {
            let len = grapheme_len(&line.lyric);
            assert!(line.chords.iter().all(|c| c.index <= len), "{:?}", line);
        }
    }

    #[test]
    fn test_cleanup_paste_has_no_alignment() {
        assert_eq!(cleanup_paste("[C]a\tb", 2), "[C]a  b");
        assert_eq!(cleanup_paste("a\r\rb", 8), "a\n\nb");
    }
}
