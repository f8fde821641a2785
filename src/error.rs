//! Error types for loading vendor tables and transforming single records.
//!
//! [`LoadError`] is fatal for a run: without the source tables nothing can be
//! written. [`RecordError`] is local to one character entry; the converter
//! logs it and moves on.

use std::path::PathBuf;

/// Failure to read one of the vendor JSON tables.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The table file does not exist.
    #[error("source table not found: {path:?}")]
    Missing { path: PathBuf },

    /// The file exists but could not be read.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not the JSON shape we expect.
    #[error("malformed JSON in {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure while turning one character entry into an operator row.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("could not decode {kind} entry: {source}")]
    Decode {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
}

impl RecordError {
    pub fn decode(kind: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { kind, source }
    }
}
