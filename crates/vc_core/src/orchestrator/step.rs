//! Pipeline step trait definition.

use super::errors::StepResult;
use super::types::{Context, TaskState};
use crate::models::TaskStage;

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output
///
/// A failure in any of them is reported once with `failure_message` and
/// halts the pipeline, unless the step is optional.
pub trait PipelineStep: Send + Sync {
    /// Step name (for logging and error context).
    fn name(&self) -> &str;

    /// Stage this step implements.
    fn stage(&self) -> TaskStage;

    /// Stage message used in the error record when this step fails.
    fn failure_message(&self) -> &str;

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    /// Perform the step's work and record results in `state`.
    fn execute(&self, ctx: &Context, state: &mut TaskState) -> StepResult<()>;

    fn validate_output(&self, _ctx: &Context, _state: &TaskState) -> StepResult<()> {
        Ok(())
    }

    /// Whether a failure of this step is reported but not fatal.
    ///
    /// Default is `false` (step is required).
    fn is_optional(&self) -> bool {
        false
    }

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
