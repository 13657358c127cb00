//! Chunk and merge types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A discovered fragment with its ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFile {
    /// Location of the fragment.
    pub path: PathBuf,
    /// Position extracted from the filename.
    pub sequence_key: u64,
}

/// How the merged artifact is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Write to `<output>.partial` and rename on success.
    ///
    /// A failed merge removes the partial file and never touches `output`.
    #[default]
    Atomic,
    /// Write straight into `output`.
    ///
    /// A failed merge leaves the bytes copied so far on disk.
    InPlace,
}

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Path of the merged artifact.
    pub output: PathBuf,
    /// Number of chunks concatenated.
    pub chunk_count: usize,
    /// Total bytes written.
    pub bytes_written: u64,
}
