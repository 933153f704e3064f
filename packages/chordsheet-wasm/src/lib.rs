use serde::Serialize;
use wasm_bindgen::prelude::*;

use chordsheet::render::{chord_grid, GridCell};
use chordsheet::{Body, InputMode, SongError};

#[derive(Serialize, Debug, PartialEq)]
struct BindingError {
    message: String,
    kind: &'static str,
}

fn error_payload(e: &SongError) -> BindingError {
    let kind = match e {
        SongError::MetadataError(_) => "metadata",
        SongError::InvalidKey(_) => "key",
        SongError::ValidationError(_) => "validation",
        SongError::Json(_) => "json",
    };
    BindingError {
        message: e.to_string(),
        kind,
    }
}

fn to_js_error(e: SongError) -> JsValue {
    match serde_json::to_string(&error_payload(&e)) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&e.to_string()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js_error(e.into()))
}

fn decode_body(body_json: &str) -> Result<Body, JsValue> {
    Body::from_json(body_json).map_err(|e| to_js_error(e.into()))
}

/// Parse ChordPro text and return the body as JSON
#[wasm_bindgen]
pub fn parse_chordpro(text: &str) -> Result<String, JsValue> {
    to_json(&chordsheet::parse_text(text))
}

/// Convert two-line (chords over lyrics) text into ChordPro text
#[wasm_bindgen]
pub fn convert_two_line(text: &str, tab_width: usize) -> String {
    chordsheet::two_line_to_chordpro(text, tab_width)
}

/// Build a body from raw editor text. `mode` is "chordpro" or "two-line".
#[wasm_bindgen]
pub fn build_body(text: &str, mode: &str, tab_width: usize) -> Result<String, JsValue> {
    let mode = InputMode::from_str(mode).ok_or_else(|| {
        to_js_error(SongError::MetadataError(format!("unknown input mode: {}", mode)))
    })?;
    to_json(&chordsheet::build_body(text, mode, tab_width))
}

/// Whitespace cleanup for pasted text
#[wasm_bindgen]
pub fn cleanup_paste(text: &str, tab_width: usize) -> String {
    chordsheet::cleanup_paste(text, tab_width)
}

#[wasm_bindgen]
pub fn transpose_chord(chord: &str, from_key: &str, to_key: &str) -> String {
    chordsheet::transpose_chord(chord, from_key, to_key)
}

/// Transpose a body given as JSON. Equal keys hand the input back untouched.
#[wasm_bindgen]
pub fn transpose_body(body_json: &str, from_key: &str, to_key: &str) -> Result<String, JsValue> {
    if chordsheet::transpose::same_key(from_key, to_key) {
        return Ok(body_json.to_string());
    }
    let body = decode_body(body_json)?;
    to_json(&*chordsheet::transpose_body(&body, from_key, to_key))
}

/// Compile a song document (front matter + body) into a song record
#[wasm_bindgen]
pub fn compile_song(source: &str) -> Result<String, JsValue> {
    let song = chordsheet::compile_song(source).map_err(to_js_error)?;
    to_json(&song)
}

/// Per-line grid cells for a body given as JSON, ready for layout
#[wasm_bindgen]
pub fn chord_grid_json(body_json: &str) -> Result<String, JsValue> {
    let body = decode_body(body_json)?;
    let sections: Vec<Vec<Vec<GridCell<'_>>>> = body
        .sections
        .iter()
        .map(|s| s.lines.iter().map(chord_grid).collect())
        .collect();
    to_json(&sections)
}

/// Keys offered in the transpose picker
#[wasm_bindgen]
pub fn selectable_keys() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&chordsheet::SELECTABLE_KEYS[..]).map_err(JsValue::from)
}
