//! Core types for the orchestrator pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chunks::MergeSummary;
use crate::config::Settings;
use crate::logging::TaskLogger;
use crate::models::{Task, TaskStatus};
use crate::reporting::ErrorReporter;

/// Read-only context passed to pipeline steps.
///
/// Holds the task, its derived paths, and the collaborators steps report
/// through. Mutable results go in [`TaskState`].
pub struct Context {
    /// Task being processed.
    pub task: Task,
    /// Application settings.
    pub settings: Settings,
    /// Directory holding the chunks.
    pub task_dir: PathBuf,
    /// Merged artifact, `<task_dir>/merged.mp4` by default.
    pub merged_path: PathBuf,
    /// Streaming output directory, `<task_dir>/mpegdash` by default.
    pub output_dir: PathBuf,
    /// Per-task logger.
    pub logger: Arc<TaskLogger>,
    /// Failure sink.
    pub reporter: Arc<dyn ErrorReporter>,
}

impl Context {
    /// Create a context, deriving paths from the `[chunks]` settings.
    pub fn new(
        task: Task,
        settings: Settings,
        logger: Arc<TaskLogger>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let task_dir = task.path.clone();
        let merged_path = task_dir.join(&settings.chunks.merged_name);
        let output_dir = task_dir.join(&settings.chunks.output_dir_name);
        Self {
            task,
            settings,
            task_dir,
            merged_path,
            output_dir,
            logger,
            reporter,
        }
    }

    pub fn video_id(&self) -> i64 {
        self.task.video_id
    }
}

/// Mutable task state that accumulates results from pipeline steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskState {
    pub video_id: i64,
    /// When the run started.
    pub started_at: Option<String>,
    /// Current position in the stage machine.
    pub status: TaskStatus,
    /// Merge results (from the Merge step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeSummary>,
    /// Output directory once prepared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Manifest written by the transcoder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    /// Whether the merged artifact was removed.
    pub cleaned_up: bool,
    /// Non-fatal failures.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl TaskState {
    pub fn new(video_id: i64) -> Self {
        Self {
            video_id,
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    pub fn has_merge(&self) -> bool {
        self.merge.is_some()
    }
}

/// Successful outcome of one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub video_id: i64,
    /// Manifest written by the transcoder.
    pub manifest: PathBuf,
    /// Number of chunks merged.
    pub chunk_count: usize,
    /// Size of the merged artifact in bytes.
    pub merged_bytes: u64,
    /// Steps that completed, in order.
    pub steps_completed: Vec<String>,
    /// Non-fatal failures (e.g. cleanup under the warn policy).
    pub warnings: Vec<String>,
}

impl TaskOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogConfig;
    use crate::reporting::NullReporter;

    #[test]
    fn context_derives_paths_from_settings() {
        let mut settings = Settings::default();
        settings.chunks.output_dir_name = "dash".to_string();

        let ctx = Context::new(
            Task::new(4, "uploads/4"),
            settings,
            Arc::new(TaskLogger::new(4, LogConfig::default())),
            Arc::new(NullReporter),
        );

        assert_eq!(ctx.merged_path, PathBuf::from("uploads/4/merged.mp4"));
        assert_eq!(ctx.output_dir, PathBuf::from("uploads/4/dash"));
        assert_eq!(ctx.video_id(), 4);
    }

    #[test]
    fn task_state_serializes() {
        let state = TaskState::new(456);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"video_id\":456"));
        assert!(json.contains("Pending"));
        assert!(!state.has_merge());
    }
}
