//! Assemble step - builds the timeline from tokens and discovered assets.

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};
use crate::timeline::{assemble, AssemblyInput};

/// Assemble step for timeline construction.
pub struct AssembleStep;

impl PipelineStep for AssembleStep {
    fn name(&self) -> &str {
        "Assemble"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if !state.has_assets() {
            return Err(StepError::invalid_input(
                "asset discovery has not run".to_string(),
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        // validate_input guarantees both maps are present.
        let audio = state.audio.as_ref().ok_or_else(|| {
            StepError::invalid_input("audio map missing")
        })?;
        let images = state.images.as_ref().ok_or_else(|| {
            StepError::invalid_input("image map missing")
        })?;

        let entries = assemble(AssemblyInput {
            tokens: state.tokens.as_deref(),
            audio,
            images,
            vignette: ctx.lesson.vignette.as_deref(),
            pauses: ctx.settings.assembly.pause_durations(),
        })?;

        tracing::info!("assembled {} timeline entries", entries.len());
        state.timeline = Some(entries);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.timeline {
            Some(entries) if !entries.is_empty() => Ok(()),
            Some(_) => Err(StepError::invalid_output("timeline is empty")),
            None => Err(StepError::invalid_output("timeline not recorded")),
        }
    }
}
