//! Chunk merger: orders fragments and concatenates them byte for byte.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::discovery::{discover_chunks, DEFAULT_CHUNK_SUFFIX};
use super::errors::{MergeError, MergeResult};
use super::sequence::sequence_key;
use super::types::{ChunkFile, MergeStrategy, MergeSummary};

/// Merges the chunks of a task directory into one file.
///
/// Ordering is ascending by sequence key. Chunks sharing a key keep their
/// discovery order (the sort is stable).
#[derive(Debug, Clone)]
pub struct ChunkMerger {
    suffix: String,
    strategy: MergeStrategy,
}

impl ChunkMerger {
    pub fn new() -> Self {
        Self {
            suffix: DEFAULT_CHUNK_SUFFIX.to_string(),
            strategy: MergeStrategy::default(),
        }
    }

    /// Set the chunk filename suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the write strategy.
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Discover the chunks in `dir` and merge them into `output`.
    pub fn merge(&self, dir: &Path, output: &Path) -> MergeResult<MergeSummary> {
        let paths = discover_chunks(dir, &self.suffix)?;
        self.merge_chunks(&paths, output)
    }

    /// Merge an explicit list of chunk paths into `output`.
    ///
    /// Every key is computed before anything is written, so an unkeyable
    /// filename aborts without creating `output`. An empty list produces an
    /// empty file.
    pub fn merge_chunks(&self, paths: &[PathBuf], output: &Path) -> MergeResult<MergeSummary> {
        let chunks = order_chunks(paths)?;

        let bytes_written = match self.strategy {
            MergeStrategy::InPlace => write_chunks(&chunks, output)?,
            MergeStrategy::Atomic => {
                let partial = partial_path(output);
                let written = write_chunks(&chunks, &partial).map_err(|e| {
                    let _ = fs::remove_file(&partial);
                    e
                })?;
                fs::rename(&partial, output).map_err(|e| {
                    let _ = fs::remove_file(&partial);
                    MergeError::io("renaming merged file", output, e)
                })?;
                written
            }
        };

        tracing::debug!(
            "Merged {} chunk(s), {} bytes into {}",
            chunks.len(),
            bytes_written,
            output.display()
        );

        Ok(MergeSummary {
            output: output.to_path_buf(),
            chunk_count: chunks.len(),
            bytes_written,
        })
    }
}

impl Default for ChunkMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Key every path and stable-sort ascending by key.
pub fn order_chunks(paths: &[PathBuf]) -> MergeResult<Vec<ChunkFile>> {
    let mut chunks = paths
        .iter()
        .map(|path| {
            Ok(ChunkFile {
                sequence_key: sequence_key(path)?,
                path: path.clone(),
            })
        })
        .collect::<MergeResult<Vec<_>>>()?;

    chunks.sort_by_key(|c| c.sequence_key);
    Ok(chunks)
}

/// Sibling temporary path used by [`MergeStrategy::Atomic`].
pub fn partial_path(output: &Path) -> PathBuf {
    let mut name: OsString = output.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_chunks(chunks: &[ChunkFile], target: &Path) -> MergeResult<u64> {
    let mut out =
        File::create(target).map_err(|e| MergeError::io("creating merged file", target, e))?;

    let mut total = 0u64;
    for chunk in chunks {
        let mut input = File::open(&chunk.path)
            .map_err(|e| MergeError::io("opening chunk", &chunk.path, e))?;
        total += io::copy(&mut input, &mut out)
            .map_err(|e| MergeError::io("copying chunk", &chunk.path, e))?;
    }

    out.sync_all()
        .map_err(|e| MergeError::io("flushing merged file", target, e))?;

    Ok(total)
}
