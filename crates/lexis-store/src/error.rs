//! Error types for loading and querying.
//!
//! Two layers:
//! - [`DecodeError`] is per record. The loader recovers from it by skipping the
//!   line, so it never escapes [`crate::WordNetLoader::load`].
//! - [`LexisError`] is what the public API returns. Its `Io` variant is reserved
//!   for failures that differ from "file absent" (permission denied, a read
//!   error mid-scan, ...).

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LexisError>;

#[derive(Debug, Error)]
pub enum LexisError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid synset id {0:?}: expected 8 ASCII digits")]
    InvalidId(String),

    #[error("invalid category {0:?}: expected one of n, v, a, r, s")]
    InvalidCategory(String),
}

impl LexisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a single line was rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed record: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("synset has no words")]
    EmptyWords,

    #[error("word {index} has an empty lemma")]
    EmptyLemma { index: usize },

    #[error("lex_id {0} out of range (0..=15)")]
    LexIdOutOfRange(u8),

    #[error("lex_filenum {0} out of range (0..=44)")]
    LexFileOutOfRange(u8),

    #[error("sense number must be >= 1")]
    InvalidSenseNumber,

    #[error("frame number {0} out of range (1..=35)")]
    InvalidFrameNumber(u8),

    #[error("invalid sense key {0:?}")]
    InvalidSenseKey(String),

    #[error("exception entry has an empty inflected form")]
    EmptyInflectedForm,

    #[error("exception entry for {0:?} has no base forms")]
    EmptyBaseForms(String),
}
