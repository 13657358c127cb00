//! Task handler - entry point for one task message.
//!
//! Decodes the message, wires up the per-task logger and context, and runs
//! the standard pipeline. Returns a summary on success or the first error.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::logging::{LogConfig, TaskLogger};
use crate::models::{salvage_video_id, ErrorKind, Task, TaskDecodeError};
use crate::reporting::{ErrorReporter, TracingReporter};
use crate::transcode::{FfmpegTranscoder, Transcoder};

use super::create_standard_pipeline;
use super::errors::TaskError;
use super::types::{Context, TaskOutcome, TaskState};

/// Stage message reported when a task message cannot be decoded.
const PARSE_FAILURE_MESSAGE: &str = "Error unmarshalling task";

/// Runs task messages through the standard pipeline.
///
/// Every failed task produces exactly one error record on the reporter.
/// Decode failures are reported here; stage failures are reported by the
/// pipeline.
pub struct TaskHandler {
    settings: Settings,
    reporter: Arc<dyn ErrorReporter>,
    transcoder: Arc<dyn Transcoder>,
}

impl TaskHandler {
    /// Handler with the ffmpeg transcoder and the tracing reporter.
    pub fn new(settings: Settings) -> Self {
        let transcoder = Arc::new(FfmpegTranscoder::from_settings(&settings.transcoder));
        Self {
            settings,
            reporter: Arc::new(TracingReporter),
            transcoder,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_transcoder(mut self, transcoder: Arc<dyn Transcoder>) -> Self {
        self.transcoder = transcoder;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Decode a raw task message and run it.
    pub fn handle(&self, message: &[u8]) -> Result<TaskOutcome, TaskError> {
        let task = match Task::from_json(message) {
            Ok(task) => task,
            Err(source) => return Err(self.reject(salvage_video_id(message), source)),
        };

        self.execute(&task)
    }

    /// Run a task built by the caller.
    ///
    /// Applies the same checks as a decoded message, so an invalid task is
    /// reported and rejected exactly like an undecodable one.
    pub fn run(&self, task: &Task) -> Result<TaskOutcome, TaskError> {
        if let Err(source) = task.validate() {
            return Err(self.reject(task.video_id, source));
        }
        self.execute(task)
    }

    fn reject(&self, video_id: i64, source: TaskDecodeError) -> TaskError {
        tracing::debug!(video_id, "Rejecting invalid task");
        self.reporter.report(
            video_id,
            PARSE_FAILURE_MESSAGE,
            &source.to_string(),
            ErrorKind::Parse,
        );
        TaskError::Parse { video_id, source }
    }

    fn execute(&self, task: &Task) -> Result<TaskOutcome, TaskError> {
        let logger = Arc::new(self.create_logger(task.video_id));
        logger.info(&format!(
            "Processing video {} in {}",
            task.video_id,
            task.path.display()
        ));

        let ctx = Context::new(
            task.clone(),
            self.settings.clone(),
            Arc::clone(&logger),
            Arc::clone(&self.reporter),
        );
        let mut state = TaskState::new(task.video_id);
        let pipeline = create_standard_pipeline(&self.settings, Arc::clone(&self.transcoder));

        let run_result = pipeline.run(&ctx, &mut state);
        logger.flush();
        let run_result = run_result?;

        let manifest = state
            .manifest
            .take()
            .unwrap_or_else(|| ctx.output_dir.join(&self.settings.transcoder.manifest_name));
        let (chunk_count, merged_bytes) = state
            .merge
            .as_ref()
            .map(|m| (m.chunk_count, m.bytes_written))
            .unwrap_or_default();

        Ok(TaskOutcome {
            video_id: task.video_id,
            manifest,
            chunk_count,
            merged_bytes,
            steps_completed: run_result.steps_completed,
            warnings: run_result.warnings,
        })
    }

    /// Run several messages in order. One failure does not stop the rest.
    pub fn handle_batch<I, M>(&self, messages: I) -> Vec<Result<TaskOutcome, TaskError>>
    where
        I: IntoIterator<Item = M>,
        M: AsRef<[u8]>,
    {
        messages
            .into_iter()
            .map(|message| self.handle(message.as_ref()))
            .collect()
    }

    fn create_logger(&self, video_id: i64) -> TaskLogger {
        let config = LogConfig::from(&self.settings.logging);

        if !self.settings.logging.task_logs {
            return TaskLogger::new(video_id, config);
        }

        let log_dir = PathBuf::from(&self.settings.paths.logs_folder);
        match TaskLogger::with_file(video_id, &log_dir, config.clone()) {
            Ok(logger) => logger,
            Err(e) => {
                tracing::warn!(
                    video_id,
                    "Could not open task log in {}: {}",
                    log_dir.display(),
                    e
                );
                TaskLogger::new(video_id, config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::models::TaskStage;
    use crate::orchestrator::errors::PipelineError;
    use crate::reporting::RecordingReporter;
    use crate::transcode::{TranscodeError, TranscodeOutput, TranscodeResult};
    use tempfile::tempdir;

    struct ManifestWriter;

    impl Transcoder for ManifestWriter {
        fn name(&self) -> &str {
            "fake"
        }

        fn transcode(&self, input: &Path, output_dir: &Path) -> TranscodeResult<TranscodeOutput> {
            let manifest = output_dir.join("output.mpd");
            fs::write(&manifest, fs::read(input).unwrap()).unwrap();
            Ok(TranscodeOutput {
                manifest,
                diagnostics: "frame=1\n".to_string(),
            })
        }
    }

    struct AlwaysFails;

    impl Transcoder for AlwaysFails {
        fn name(&self) -> &str {
            "broken"
        }

        fn transcode(&self, _input: &Path, _output_dir: &Path) -> TranscodeResult<TranscodeOutput> {
            Err(TranscodeError::Failed {
                program: "broken".to_string(),
                exit_code: 1,
                diagnostics: "Invalid data found when processing input".to_string(),
            })
        }
    }

    fn handler(transcoder: Arc<dyn Transcoder>) -> (TaskHandler, RecordingReporter) {
        let reporter = RecordingReporter::new();
        let handler = TaskHandler::new(Settings::default())
            .with_reporter(Arc::new(reporter.clone()))
            .with_transcoder(transcoder);
        (handler, reporter)
    }

    fn message(video_id: i64, dir: &Path) -> Vec<u8> {
        serde_json::to_vec(&Task::new(video_id, dir)).unwrap()
    }

    #[test]
    fn successful_task_returns_outcome() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("0.chunk"), b"ab").unwrap();
        fs::write(dir.path().join("1.chunk"), b"cd").unwrap();
        let (handler, reporter) = handler(Arc::new(ManifestWriter));

        let outcome = handler.handle(&message(8, dir.path())).unwrap();

        assert_eq!(outcome.video_id, 8);
        assert_eq!(outcome.chunk_count, 2);
        assert_eq!(outcome.merged_bytes, 4);
        assert_eq!(outcome.manifest, dir.path().join("mpegdash").join("output.mpd"));
        assert!(outcome.is_clean());
        assert_eq!(fs::read(&outcome.manifest).unwrap(), b"abcd");
        assert!(!dir.path().join("merged.mp4").exists());
        assert!(reporter.is_empty());
    }

    #[test]
    fn parse_failure_is_reported_with_salvaged_id() {
        let (handler, reporter) = handler(Arc::new(ManifestWriter));

        let err = handler.handle(br#"{"video_id": 12}"#).unwrap_err();

        assert!(matches!(err, TaskError::Parse { video_id: 12, .. }));
        let records = reporter.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, 12);
        assert_eq!(records[0].error, "Error unmarshalling task");
        assert_eq!(records[0].kind, ErrorKind::Parse);
    }

    #[test]
    fn transcode_failure_is_reported_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("0.chunk"), b"x").unwrap();
        let (handler, reporter) = handler(Arc::new(AlwaysFails));

        let err = handler.handle(&message(5, dir.path())).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transcode);
        assert!(matches!(
            err,
            TaskError::Pipeline(PipelineError::StageFailed {
                stage: TaskStage::Transcoding,
                ..
            })
        ));
        let records = reporter.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error, "failed to convert video to mpeg-dash");
        assert!(records[0].details.contains("Invalid data"));
        assert!(dir.path().join("merged.mp4").exists());
    }

    #[test]
    fn batch_continues_after_failure() {
        let dir = tempdir().unwrap();
        let (handler, reporter) = handler(Arc::new(ManifestWriter));
        let messages = vec![b"not json".to_vec(), message(3, dir.path())];

        let results = handler.handle_batch(messages);

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn task_logs_written_when_enabled() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");
        let task_dir = dir.path().join("task");
        fs::create_dir(&task_dir).unwrap();
        fs::write(task_dir.join("0.chunk"), b"x").unwrap();

        let mut settings = Settings::default();
        settings.logging.task_logs = true;
        settings.paths.logs_folder = logs.to_string_lossy().into_owned();
        let handler = TaskHandler::new(settings)
            .with_reporter(Arc::new(RecordingReporter::new()))
            .with_transcoder(Arc::new(ManifestWriter));

        handler.run(&Task::new(21, &task_dir)).unwrap();

        let log = fs::read_to_string(logs.join("task_21.log")).unwrap();
        assert!(log.contains("Processing video 21"));
        assert!(log.contains("=== Merge: Concatenate chunks in sequence order ==="));
        assert!(log.contains("=== Cleanup: Delete the merged file ==="));
    }

    #[test]
    fn run_rejects_empty_path_like_handle() {
        let (handler, reporter) = handler(Arc::new(ManifestWriter));

        let err = handler.run(&Task::new(14, "")).unwrap_err();

        assert!(matches!(err, TaskError::Parse { video_id: 14, .. }));
        let records = reporter.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ErrorKind::Parse);
        assert_eq!(records[0].error, "Error unmarshalling task");
    }
}
