//! Cleanup step - removes the merged artifact after a successful transcode.

use std::fs;

use crate::models::{CleanupFailurePolicy, TaskStage};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, TaskState};

/// Deletes the merged artifact.
///
/// Under [`CleanupFailurePolicy::Warn`] the step is optional: a failed
/// delete is reported and the task still succeeds.
pub struct CleanupStep {
    policy: CleanupFailurePolicy,
}

impl CleanupStep {
    pub fn new(policy: CleanupFailurePolicy) -> Self {
        Self { policy }
    }
}

impl Default for CleanupStep {
    fn default() -> Self {
        Self::new(CleanupFailurePolicy::default())
    }
}

impl PipelineStep for CleanupStep {
    fn name(&self) -> &str {
        "Cleanup"
    }

    fn stage(&self) -> TaskStage {
        TaskStage::Cleanup
    }

    fn failure_message(&self) -> &str {
        "failed to delete merged file"
    }

    fn description(&self) -> &str {
        "Delete the merged file"
    }

    fn execute(&self, ctx: &Context, state: &mut TaskState) -> StepResult<()> {
        ctx.logger.info(&format!(
            "Deleting merged file {}",
            ctx.merged_path.display()
        ));

        fs::remove_file(&ctx.merged_path)
            .map_err(|e| StepError::cleanup(&ctx.merged_path, e))?;

        state.cleaned_up = true;
        Ok(())
    }

    fn is_optional(&self) -> bool {
        self.policy == CleanupFailurePolicy::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Settings;
    use crate::logging::{LogConfig, TaskLogger};
    use crate::models::Task;
    use crate::reporting::NullReporter;
    use tempfile::tempdir;

    #[test]
    fn optional_only_under_warn_policy() {
        assert!(CleanupStep::new(CleanupFailurePolicy::Warn).is_optional());
        assert!(!CleanupStep::new(CleanupFailurePolicy::Fail).is_optional());
    }

    #[test]
    fn removes_merged_file() {
        let dir = tempdir().unwrap();
        let merged = dir.path().join("merged.mp4");
        fs::write(&merged, b"data").unwrap();
        let ctx = Context::new(
            Task::new(3, dir.path()),
            Settings::default(),
            Arc::new(TaskLogger::new(3, LogConfig::default())),
            Arc::new(NullReporter),
        );
        let mut state = TaskState::new(3);

        CleanupStep::default().execute(&ctx, &mut state).unwrap();

        assert!(!merged.exists());
        assert!(state.cleaned_up);
    }
}
