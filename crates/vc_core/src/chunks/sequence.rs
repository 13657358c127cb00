//! Sequence key extraction from chunk filenames.
//!
//! Uploaders name fragments with an embedded counter (`part1.chunk`,
//! `video_0007.chunk`, `12-upload.chunk`). The first run of ASCII digits in
//! the base name is the fragment's position.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{MergeError, MergeResult};

// `\d` would also match non-ASCII digits.
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

/// Extract the ordering key of a chunk.
///
/// Only the final path component is inspected, so digits in parent
/// directories (`uploads/42/part3.chunk`) never leak into the key.
///
/// Fails with [`MergeError::SequenceParse`] when the base name has no digits
/// or the digit run does not fit in a `u64`.
pub fn sequence_key(path: &Path) -> MergeResult<u64> {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .ok_or_else(|| MergeError::sequence_parse(path))?;

    DIGIT_RUN
        .find(&base)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(|| MergeError::sequence_parse(path))
}
