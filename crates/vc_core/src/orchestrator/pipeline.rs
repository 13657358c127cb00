//! Pipeline runner that executes steps in sequence.

use super::errors::{PipelineError, PipelineResult, StepResult};
use super::step::PipelineStep;
use super::types::{Context, TaskState};
use crate::models::TaskStatus;

/// Pipeline that runs a sequence of steps.
///
/// Steps run strictly in order with no retries. The first failure of a
/// required step is reported through the context's reporter and ends the
/// run; failures of optional steps are reported and recorded as warnings.
pub struct Pipeline {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run the pipeline with the given context and state.
    ///
    /// For each step:
    /// 1. Mark the stage as running in `state`
    /// 2. Run `validate_input`, `execute`, `validate_output`
    /// 3. On failure, emit exactly one error record
    ///
    /// Leaves `state.status` at `Done` or `Failed`.
    pub fn run(&self, ctx: &Context, state: &mut TaskState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult::default();

        for step in &self.steps {
            let step_name = step.name();
            let stage = step.stage();
            state.status = TaskStatus::Running(stage);
            ctx.logger.phase(&format!("{}: {}", step_name, step.description()));

            match run_step(step.as_ref(), ctx, state) {
                Ok(()) => {
                    ctx.logger.success(&format!("{} completed", step_name));
                    result.steps_completed.push(step_name.to_string());
                }
                Err(e) => {
                    let kind = e.kind();
                    let details = e.to_string();
                    ctx.reporter
                        .report(ctx.video_id(), step.failure_message(), &details, kind);

                    if step.is_optional() {
                        ctx.logger.warn(&format!("{} failed (continuing): {}", step_name, details));
                        let warning = format!("{}: {}", step.failure_message(), details);
                        state.warnings.push(warning.clone());
                        result.warnings.push(warning);
                        continue;
                    }

                    ctx.logger.error(&format!("{} failed: {}", step_name, details));
                    state.status = TaskStatus::Failed { stage, kind };
                    return Err(PipelineError::stage_failed(ctx.video_id(), stage, e));
                }
            }
        }

        state.status = TaskStatus::Done;
        ctx.logger.success("Pipeline completed successfully");

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn run_step(step: &dyn PipelineStep, ctx: &Context, state: &mut TaskState) -> StepResult<()> {
    ctx.logger.debug(&format!("Validating input for '{}'", step.name()));
    step.validate_input(ctx)?;

    ctx.logger.debug(&format!("Executing '{}'", step.name()));
    step.execute(ctx, state)?;

    ctx.logger.debug(&format!("Validating output for '{}'", step.name()));
    step.validate_output(ctx, state)
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Reported failures of optional steps.
    pub warnings: Vec<String>,
}

impl PipelineRunResult {
    /// True when no optional step failed.
    pub fn all_completed(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::config::Settings;
    use crate::logging::{LogConfig, TaskLogger};
    use crate::models::{ErrorKind, Task, TaskStage};
    use crate::orchestrator::errors::StepError;
    use crate::reporting::RecordingReporter;

    struct CountingStep {
        name: &'static str,
        stage: TaskStage,
        fail: bool,
        optional: bool,
        execute_count: Arc<AtomicUsize>,
    }

    impl CountingStep {
        fn new(name: &'static str, stage: TaskStage, counter: &Arc<AtomicUsize>) -> Self {
            Self {
                name,
                stage,
                fail: false,
                optional: false,
                execute_count: Arc::clone(counter),
            }
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn optional(mut self) -> Self {
            self.optional = true;
            self
        }
    }

    impl PipelineStep for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn stage(&self) -> TaskStage {
            self.stage
        }

        fn failure_message(&self) -> &str {
            "counting step failed"
        }

        fn execute(&self, _ctx: &Context, _state: &mut TaskState) -> StepResult<()> {
            self.execute_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StepError::directory(
                    "/nowhere",
                    io::Error::from(io::ErrorKind::PermissionDenied),
                ));
            }
            Ok(())
        }

        fn is_optional(&self) -> bool {
            self.optional
        }
    }

    fn context(reporter: &RecordingReporter) -> Context {
        crate::logging::init_test_tracing();
        Context::new(
            Task::new(8, "/tmp/task-8"),
            Settings::default(),
            Arc::new(TaskLogger::new(8, LogConfig::default())),
            Arc::new(reporter.clone()),
        )
    }

    #[test]
    fn pipeline_builds_correctly() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(CountingStep::new("Step1", TaskStage::Merging, &counter))
            .with_step(CountingStep::new("Step2", TaskStage::DirPrep, &counter));

        assert_eq!(pipeline.step_count(), 2);
        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn runs_all_steps_and_finishes_done() {
        let counter = Arc::new(AtomicUsize::new(0));
        let reporter = RecordingReporter::new();
        let ctx = context(&reporter);
        let mut state = TaskState::new(8);

        let result = Pipeline::new()
            .with_step(CountingStep::new("Step1", TaskStage::Merging, &counter))
            .with_step(CountingStep::new("Step2", TaskStage::DirPrep, &counter))
            .run(&ctx, &mut state)
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(result.steps_completed, vec!["Step1", "Step2"]);
        assert!(result.all_completed());
        assert_eq!(state.status, TaskStatus::Done);
        assert!(reporter.is_empty());
    }

    #[test]
    fn required_failure_halts_and_reports_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let reporter = RecordingReporter::new();
        let ctx = context(&reporter);
        let mut state = TaskState::new(8);

        let err = Pipeline::new()
            .with_step(CountingStep::new("Step1", TaskStage::DirPrep, &counter).failing())
            .with_step(CountingStep::new("Step2", TaskStage::Transcoding, &counter))
            .run(&ctx, &mut state)
            .unwrap_err();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(err.stage(), TaskStage::DirPrep);
        assert_eq!(
            state.status,
            TaskStatus::Failed {
                stage: TaskStage::DirPrep,
                kind: ErrorKind::Directory,
            }
        );
        let records = reporter.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, 8);
        assert_eq!(records[0].error, "counting step failed");
    }

    #[test]
    fn optional_failure_is_reported_but_not_fatal() {
        let counter = Arc::new(AtomicUsize::new(0));
        let reporter = RecordingReporter::new();
        let ctx = context(&reporter);
        let mut state = TaskState::new(8);

        let result = Pipeline::new()
            .with_step(
                CountingStep::new("Step1", TaskStage::Cleanup, &counter)
                    .failing()
                    .optional(),
            )
            .with_step(CountingStep::new("Step2", TaskStage::Cleanup, &counter))
            .run(&ctx, &mut state)
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(result.steps_completed, vec!["Step2"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(state.warnings, result.warnings);
        assert_eq!(state.status, TaskStatus::Done);
        assert_eq!(reporter.len(), 1);
    }
}
