//! Transcoder error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the external transcoder.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// The transcoder process could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The transcoder exited unsuccessfully.
    #[error("{program} failed with exit code {exit_code}: {diagnostics}")]
    Failed {
        program: String,
        exit_code: i32,
        diagnostics: String,
    },

    /// The merged artifact to transcode does not exist.
    #[error("Transcode input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// The transcoder reported success but wrote no manifest.
    #[error("Transcoder produced no manifest at {}", path.display())]
    MissingManifest { path: PathBuf },
}

impl TranscodeError {
    /// Captured transcoder output, if the process ran.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            TranscodeError::Failed { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

/// Result type for transcoder operations.
pub type TranscodeResult<T> = Result<T, TranscodeError>;
