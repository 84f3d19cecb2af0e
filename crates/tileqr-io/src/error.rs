//! I/O error type (spec §7 kind 1: fatal before any worker starts).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("matrix file not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed matrix data at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("dimension mismatch: header declared {expected} values, buffer has {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
