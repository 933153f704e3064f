pub mod api;
pub mod body;
pub mod chord;
pub mod chordpro;
pub mod error;
pub mod grapheme;
pub mod key;
pub mod render;
pub mod song;
pub mod transpose;
pub mod twoline;

pub use api::{build_body, compile_song, compile_song_unchecked, render_song, Emit, InputMode};
pub use body::{Body, ChordMarker, Line, Section, SectionKind};
pub use chordpro::{parse_line, parse_text, to_chordpro};
pub use error::SongError;
pub use key::{Key, SELECTABLE_KEYS};
pub use song::{parse_song, parse_song_with, validate, Language, Song, SongMetadata};
pub use transpose::{transpose_body, transpose_chord};
pub use twoline::{cleanup_paste, convert as two_line_to_chordpro};
