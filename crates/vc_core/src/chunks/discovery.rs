//! Chunk file discovery.
//!
//! Scans a task directory for fragment files directly inside it. Entries
//! that stat as directories or other non-files are skipped; nothing is read
//! or modified.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{MergeError, MergeResult};

/// Default filename suffix of uploaded fragments.
pub const DEFAULT_CHUNK_SUFFIX: &str = ".chunk";

/// List chunk files inside `dir` whose names end with `suffix`.
///
/// The result is sorted by file name so that enumeration order does not
/// depend on the filesystem. This order is the tie-break for chunks that
/// share a sequence key.
///
/// Returns an empty vector for a directory without matches. Fails with
/// [`MergeError::Discovery`] when `dir` is missing, unreadable, or not a
/// directory.
pub fn discover_chunks(dir: &Path, suffix: &str) -> MergeResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| MergeError::discovery(dir, e))?;

    let mut chunks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MergeError::discovery(dir, e))?;
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(suffix) {
            continue;
        }

        let path = entry.path();
        // Follows symlinks. An entry that cannot be stat'ed is kept so the
        // merge fails on it instead of silently dropping a fragment.
        match fs::metadata(&path) {
            Ok(meta) if !meta.is_file() => continue,
            Ok(_) => chunks.push(path),
            Err(e) => {
                tracing::warn!("Cannot stat chunk {}: {}", path.display(), e);
                chunks.push(path);
            }
        }
    }

    chunks.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!("Discovered {} chunk(s) in {}", chunks.len(), dir.display());

    Ok(chunks)
}
