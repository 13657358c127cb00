//! Pipeline orchestrator for coordinating task execution.
//!
//! Each task runs through a fixed sequence of steps. A step validates its
//! input, does its work, and validates its output; the first required
//! failure is reported once and ends the task.
//!
//! # Architecture
//!
//! ```text
//! TaskHandler
//!     └── Pipeline
//!             ├── Step: Merge          (chunks -> merged.mp4)
//!             ├── Step: PrepareOutput  (mkdir mpegdash)
//!             ├── Step: Transcode      (merged.mp4 -> output.mpd)
//!             └── Step: Cleanup        (rm merged.mp4)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vc_core::config::Settings;
//! use vc_core::orchestrator::TaskHandler;
//!
//! let handler = TaskHandler::new(Settings::default());
//! let outcome = handler.handle(br#"{"video_id": 1, "path": "uploads/1"}"#);
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod task_handler;
mod types;

use std::sync::Arc;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult, TaskError};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{CleanupStep, MergeStep, PrepareOutputStep, TranscodeStep};
pub use task_handler::TaskHandler;
pub use types::{Context, TaskOutcome, TaskState};

use crate::config::Settings;
use crate::transcode::Transcoder;

/// Create the standard pipeline with all steps in the correct order.
///
/// 1. Merge - concatenate chunks into the merged file
/// 2. PrepareOutput - create the streaming output directory
/// 3. Transcode - convert the merged file to MPEG-DASH
/// 4. Cleanup - delete the merged file
pub fn create_standard_pipeline(settings: &Settings, transcoder: Arc<dyn Transcoder>) -> Pipeline {
    Pipeline::new()
        .with_step(MergeStep::from_settings(&settings.chunks))
        .with_step(PrepareOutputStep::new())
        .with_step(TranscodeStep::new(transcoder))
        .with_step(CleanupStep::new(settings.pipeline.cleanup_failure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::FfmpegTranscoder;

    #[test]
    fn standard_pipeline_order() {
        let pipeline =
            create_standard_pipeline(&Settings::default(), Arc::new(FfmpegTranscoder::new()));

        assert_eq!(
            pipeline.step_names(),
            vec!["Merge", "PrepareOutput", "Transcode", "Cleanup"]
        );
    }
}
