//! Error types for recitation-core.

use thiserror::Error;

/// Result type alias using CorpusError.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while loading or installing a verse corpus.
///
/// The alignment and scoring functions are total and never return these.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("invalid verse key: {value}")]
    InvalidKey { value: String },

    #[error("invalid verse at position {position}: {reason}")]
    InvalidVerse { position: usize, reason: String },

    #[error("duplicate verse key {key} at position {position}")]
    DuplicateKey { key: String, position: usize },

    #[error("malformed corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("verse corpus already installed")]
    AlreadyInstalled,
}
