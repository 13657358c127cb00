//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Task → Stage → Operation → Detail

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::chunks::MergeError;
use crate::models::{ErrorKind, TaskDecodeError, TaskStage};
use crate::transcode::TranscodeError;

/// Top-level error for one task invocation.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task message could not be decoded.
    #[error("Task message could not be decoded: {source}")]
    Parse {
        /// Salvaged id, 0 when unknown.
        video_id: i64,
        #[source]
        source: TaskDecodeError,
    },

    /// The pipeline stopped at a stage.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::Parse { .. } => ErrorKind::Parse,
            TaskError::Pipeline(e) => e.kind(),
        }
    }

    pub fn video_id(&self) -> i64 {
        match self {
            TaskError::Parse { video_id, .. } => *video_id,
            TaskError::Pipeline(PipelineError::StageFailed { video_id, .. }) => *video_id,
        }
    }
}

/// Pipeline error with task and stage context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage failed and halted the remaining stages.
    #[error("Task {video_id} failed at stage '{stage}': {source}")]
    StageFailed {
        video_id: i64,
        stage: TaskStage,
        #[source]
        source: StepError,
    },
}

impl PipelineError {
    /// Create a stage failed error.
    pub fn stage_failed(video_id: i64, stage: TaskStage, source: StepError) -> Self {
        Self::StageFailed {
            video_id,
            stage,
            source,
        }
    }

    pub fn stage(&self) -> TaskStage {
        match self {
            PipelineError::StageFailed { stage, .. } => *stage,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::StageFailed { source, .. } => source.kind(),
        }
    }

    /// The underlying step error.
    pub fn step_error(&self) -> &StepError {
        match self {
            PipelineError::StageFailed { source, .. } => source,
        }
    }
}

/// Error from a pipeline step.
#[derive(Error, Debug)]
pub enum StepError {
    /// Chunk discovery, keying, or concatenation failed.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The streaming output directory could not be created.
    #[error("Cannot create output directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The transcoder failed.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// The merged artifact could not be deleted.
    #[error("Cannot delete merged file {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StepError {
    /// Create a directory error.
    pub fn directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Directory {
            path: path.into(),
            source,
        }
    }

    /// Create a cleanup error.
    pub fn cleanup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Cleanup {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StepError::Merge(e) => e.kind(),
            StepError::Directory { .. } => ErrorKind::Directory,
            StepError::Transcode(_) => ErrorKind::Transcode,
            StepError::Cleanup { .. } => ErrorKind::Cleanup,
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_kinds_follow_taxonomy() {
        let merge: StepError = MergeError::sequence_parse("intro.chunk").into();
        assert_eq!(merge.kind(), ErrorKind::SequenceParse);

        let dir = StepError::directory(
            "/t/mpegdash",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(dir.kind(), ErrorKind::Directory);

        let transcode: StepError = TranscodeError::MissingManifest {
            path: PathBuf::from("/t/mpegdash/output.mpd"),
        }
        .into();
        assert_eq!(transcode.kind(), ErrorKind::Transcode);
    }

    #[test]
    fn pipeline_error_chains_context() {
        let step_err =
            StepError::cleanup("/t/merged.mp4", io::Error::from(io::ErrorKind::NotFound));
        let err = PipelineError::stage_failed(12, TaskStage::Cleanup, step_err);

        let msg = err.to_string();
        assert!(msg.contains("Task 12"));
        assert!(msg.contains("Cleanup"));
        assert!(msg.contains("merged.mp4"));
        assert_eq!(err.kind(), ErrorKind::Cleanup);

        let task_err = TaskError::from(err);
        assert_eq!(task_err.video_id(), 12);
        assert_eq!(task_err.kind(), ErrorKind::Cleanup);
    }
}
