//! Merge step - concatenates the task's chunks into the merged artifact.

use crate::chunks::ChunkMerger;
use crate::config::ChunkSettings;
use crate::models::TaskStage;
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, TaskState};

pub struct MergeStep {
    merger: ChunkMerger,
}

impl MergeStep {
    pub fn new(merger: ChunkMerger) -> Self {
        Self { merger }
    }

    /// Build from the `[chunks]` config section.
    pub fn from_settings(settings: &ChunkSettings) -> Self {
        Self::new(
            ChunkMerger::new()
                .with_suffix(settings.suffix.clone())
                .with_strategy(settings.merge_strategy),
        )
    }
}

impl Default for MergeStep {
    fn default() -> Self {
        Self::new(ChunkMerger::new())
    }
}

impl PipelineStep for MergeStep {
    fn name(&self) -> &str {
        "Merge"
    }

    fn stage(&self) -> TaskStage {
        TaskStage::Merging
    }

    fn failure_message(&self) -> &str {
        "failed to merge chunks"
    }

    fn description(&self) -> &str {
        "Concatenate chunks in sequence order"
    }

    fn execute(&self, ctx: &Context, state: &mut TaskState) -> StepResult<()> {
        ctx.logger.info(&format!("Merging chunks from {}", ctx.task_dir.display()));

        let summary = self.merger.merge(&ctx.task_dir, &ctx.merged_path)?;

        if summary.chunk_count == 0 {
            ctx.logger.warn("No chunks found; merged file is empty");
        }
        ctx.logger.info(&format!(
            "Merged {} chunk(s), {} bytes into {}",
            summary.chunk_count,
            summary.bytes_written,
            summary.output.display()
        ));

        state.merge = Some(summary);
        Ok(())
    }
}
