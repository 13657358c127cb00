//! Error types for chunk discovery and merging.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::ErrorKind;

/// Errors raised while discovering, keying, or concatenating chunks.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The chunk directory could not be listed.
    #[error("Cannot list chunk directory {}: {source}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A chunk filename carries no usable sequence number.
    #[error("No sequence number in chunk filename: {}", file.display())]
    SequenceParse { file: PathBuf },

    /// File I/O failed while building the merged artifact.
    #[error("I/O error while {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MergeError {
    /// Create a discovery error.
    pub fn discovery(dir: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Discovery {
            dir: dir.into(),
            source,
        }
    }

    /// Create a sequence parse error.
    pub fn sequence_parse(file: impl Into<PathBuf>) -> Self {
        Self::SequenceParse { file: file.into() }
    }

    /// Create an I/O error with the operation that failed.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Taxonomy kind for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MergeError::Discovery { .. } => ErrorKind::Discovery,
            MergeError::SequenceParse { .. } => ErrorKind::SequenceParse,
            MergeError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Result type for chunk operations.
pub type MergeResult<T> = Result<T, MergeError>;
