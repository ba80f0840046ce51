//! Error types for vocabulary import and progress persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A vocabulary or progress file could not be imported.
///
/// Import never touches the current word list or review state on failure.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vocabulary file must contain a JSON array")]
    NotASequence,

    #[error("no valid vocabulary entries found")]
    Empty,

    #[error("progress file must map word identities to review states: {0}")]
    MalformedProgress(#[source] serde_json::Error),
}

/// Reading or writing local state failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a single vocabulary record was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("record is not an object")]
    NotAnObject,

    #[error("record has no word/kana/reading")]
    MissingWord,

    #[error("record has no translation")]
    MissingTranslation,
}
