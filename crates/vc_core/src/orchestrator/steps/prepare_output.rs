//! Output directory step - creates the streaming output directory.

use std::fs;

use crate::models::TaskStage;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, TaskState};

/// Creates `<task_dir>/mpegdash` (and any missing parents).
///
/// Idempotent: an existing directory is not an error.
#[derive(Debug, Default)]
pub struct PrepareOutputStep;

impl PrepareOutputStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for PrepareOutputStep {
    fn name(&self) -> &str {
        "PrepareOutput"
    }

    fn stage(&self) -> TaskStage {
        TaskStage::DirPrep
    }

    fn failure_message(&self) -> &str {
        "failed to create mpeg-dash directory"
    }

    fn description(&self) -> &str {
        "Create the streaming output directory"
    }

    fn execute(&self, ctx: &Context, state: &mut TaskState) -> StepResult<()> {
        ctx.logger.info(&format!(
            "Creating output directory {}",
            ctx.output_dir.display()
        ));

        fs::create_dir_all(&ctx.output_dir)
            .map_err(|e| StepError::directory(&ctx.output_dir, e))?;

        state.output_dir = Some(ctx.output_dir.clone());
        Ok(())
    }
}
