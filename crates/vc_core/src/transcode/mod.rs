//! Transcoder boundary.
//!
//! The pipeline only knows the narrow [`Transcoder`] trait: turn a merged
//! artifact into an adaptive-streaming manifest inside an output directory.
//! [`FfmpegTranscoder`] is the production implementation; tests substitute
//! their own.

mod errors;
mod ffmpeg;

use std::path::{Path, PathBuf};

pub use errors::{TranscodeError, TranscodeResult};
pub use ffmpeg::FfmpegTranscoder;

/// Result of a successful transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutput {
    /// Path of the written manifest.
    pub manifest: PathBuf,
    /// Combined stdout and stderr of the transcoder.
    pub diagnostics: String,
}

/// Converts a merged artifact into a streaming manifest plus segments.
pub trait Transcoder: Send + Sync {
    /// Short name for logs (e.g. `ffmpeg`).
    fn name(&self) -> &str;

    /// One-line description of the invocation, for logs.
    fn describe(&self, input: &Path, output_dir: &Path) -> String {
        format!("{} {} -> {}", self.name(), input.display(), output_dir.display())
    }

    /// Transcode `input` into `output_dir`.
    ///
    /// Blocks until the external work is finished. A non-zero exit or a
    /// failure to start is a [`TranscodeError`].
    fn transcode(&self, input: &Path, output_dir: &Path) -> TranscodeResult<TranscodeOutput>;
}
