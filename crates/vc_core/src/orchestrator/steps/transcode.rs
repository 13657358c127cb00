//! Transcode step - hands the merged artifact to the transcoder.

use std::sync::Arc;

use crate::models::TaskStage;
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, TaskState};
use crate::transcode::{TranscodeError, Transcoder};

pub struct TranscodeStep {
    transcoder: Arc<dyn Transcoder>,
}

impl TranscodeStep {
    pub fn new(transcoder: Arc<dyn Transcoder>) -> Self {
        Self { transcoder }
    }

    fn record_output(ctx: &Context, diagnostics: &str) {
        for line in diagnostics.lines() {
            ctx.logger.output_line(line);
        }
    }
}

impl PipelineStep for TranscodeStep {
    fn name(&self) -> &str {
        "Transcode"
    }

    fn stage(&self) -> TaskStage {
        TaskStage::Transcoding
    }

    fn failure_message(&self) -> &str {
        "failed to convert video to mpeg-dash"
    }

    fn description(&self) -> &str {
        "Convert the merged file to MPEG-DASH"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.merged_path.is_file() {
            return Err(TranscodeError::MissingInput {
                path: ctx.merged_path.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut TaskState) -> StepResult<()> {
        ctx.logger.command(&self.transcoder.describe(&ctx.merged_path, &ctx.output_dir));

        match self.transcoder.transcode(&ctx.merged_path, &ctx.output_dir) {
            Ok(output) => {
                Self::record_output(ctx, &output.diagnostics);
                ctx.logger.info(&format!("Manifest written to {}", output.manifest.display()));
                state.manifest = Some(output.manifest);
                Ok(())
            }
            Err(e) => {
                if let Some(diagnostics) = e.diagnostics() {
                    Self::record_output(ctx, diagnostics);
                }
                ctx.logger.show_tail(&format!("{} output", self.transcoder.name()));
                Err(e.into())
            }
        }
    }

    fn validate_output(&self, ctx: &Context, state: &TaskState) -> StepResult<()> {
        let manifest = state
            .manifest
            .clone()
            .unwrap_or_else(|| ctx.output_dir.join(&ctx.settings.transcoder.manifest_name));

        if !manifest.is_file() {
            return Err(TranscodeError::MissingManifest { path: manifest }.into());
        }
        Ok(())
    }
}
