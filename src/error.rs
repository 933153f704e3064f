//! # Error Types
//!
//! The chord engine itself never fails: malformed brackets, unknown chords and
//! ragged line pairs all degrade silently. Errors only come from the song
//! document layer (front matter, validation) and from JSON at the boundary.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{compile_song, SongError};
//!
//! let source = "---\nkey: H\n---\n[C]Hello";
//! match compile_song(source) {
//!     Ok(song) => println!("{} sections", song.body.sections.len()),
//!     Err(SongError::InvalidKey(key)) => eprintln!("bad key {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongError {
    /// Front matter is not valid YAML, or a field holds an unsupported value.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SongError;
    /// let err = SongError::MetadataError("unknown language: fr".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: unknown language: fr");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// The song's key does not look like `[A-G](#|b)?m?`.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The song parsed but is not complete enough to be stored.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SongError;
    /// let err = SongError::ValidationError("Title required.".to_string());
    /// assert_eq!(err.to_string(), "Validation error: Title required.");
    /// ```
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid body JSON: {0}")]
    Json(#[from] serde_json::Error),
}
