//! Encode step - renders the assembled timeline with ffmpeg.

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};
use crate::render;

/// Encode step for final video rendering.
pub struct EncodeStep;

impl PipelineStep for EncodeStep {
    fn name(&self) -> &str {
        "Encode"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if !state.has_timeline() {
            return Err(StepError::invalid_input("timeline has not been assembled"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let timeline = state
            .timeline
            .as_ref()
            .ok_or_else(|| StepError::invalid_input("timeline missing"))?;

        let output = &ctx.lesson.output;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StepError::io_error("creating output directory", e))?;
        }

        render::encode(timeline, &ctx.settings.encode, output)?;

        state.output = Some(output.clone());
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.output {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::file_not_found(path.display().to_string())),
            None => Err(StepError::invalid_output("output path not recorded")),
        }
    }
}
