//! Enum types shared across the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure taxonomy surfaced in error records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Task descriptor could not be decoded.
    #[serde(rename = "ParseError")]
    Parse,
    /// Chunk directory could not be listed.
    #[serde(rename = "DiscoveryError")]
    Discovery,
    /// A chunk filename has no ordering key.
    #[serde(rename = "SequenceParseError")]
    SequenceParse,
    /// File I/O failed during the merge.
    #[serde(rename = "IOError")]
    Io,
    /// Output directory could not be created.
    #[serde(rename = "DirectoryError")]
    Directory,
    /// The transcoder failed or produced no manifest.
    #[serde(rename = "TranscodeError")]
    Transcode,
    /// The merged artifact could not be removed.
    #[serde(rename = "CleanupError")]
    Cleanup,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "ParseError",
            ErrorKind::Discovery => "DiscoveryError",
            ErrorKind::SequenceParse => "SequenceParseError",
            ErrorKind::Io => "IOError",
            ErrorKind::Directory => "DirectoryError",
            ErrorKind::Transcode => "TranscodeError",
            ErrorKind::Cleanup => "CleanupError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stages of a task run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStage {
    Merging,
    DirPrep,
    Transcoding,
    Cleanup,
}

impl TaskStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStage::Merging => "Merging",
            TaskStage::DirPrep => "DirPrep",
            TaskStage::Transcoding => "Transcoding",
            TaskStage::Cleanup => "Cleanup",
        }
    }
}

impl fmt::Display for TaskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Currently executing the given stage.
    Running(TaskStage),
    /// All stages finished.
    Done,
    /// Stopped at `stage` with an error of `kind`.
    Failed { stage: TaskStage, kind: ErrorKind },
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskStatus::Failed { .. })
    }
}

/// What to do when the merged artifact cannot be deleted after a
/// successful transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupFailurePolicy {
    /// Report the failure and still finish the task successfully.
    #[default]
    Warn,
    /// Report the failure and fail the task.
    Fail,
}
