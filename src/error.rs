// File: src/error.rs
//! Error types for dictionary loading and word analysis.

use std::io;

use thiserror::Error;

/// The error type for all fallible operations in this crate.
///
/// Note that `Morphology::predict` never reports a missing word: an empty
/// result is the signal. `UnknownWord` is raised one layer up, by `Lexicon`.
#[derive(Error, Debug)]
pub enum MorphError {
    /// I/O errors while reading or writing dictionary files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot (de)serialization failures.
    #[error("Codec error: {0}")]
    Codec(String),

    /// The dictionary references an id that does not exist, or is otherwise
    /// inconsistent. Indicates corrupt or mismatched dictionary data.
    #[error("Dictionary integrity error: {0}")]
    Integrity(String),

    /// No analysis could be predicted for the word.
    #[error("unknown word \"{word}\"")]
    UnknownWord { word: String },
}

impl MorphError {
    pub fn integrity<S: Into<String>>(msg: S) -> Self {
        MorphError::Integrity(msg.into())
    }

    pub fn unknown_word<S: Into<String>>(word: S) -> Self {
        MorphError::UnknownWord { word: word.into() }
    }
}

impl From<bincode::Error> for MorphError {
    fn from(err: bincode::Error) -> Self {
        MorphError::Codec(err.to_string())
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(err: serde_json::Error) -> Self {
        MorphError::Codec(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MorphError>;
