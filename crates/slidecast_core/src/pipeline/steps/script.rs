//! ParseScript step - tokenizes the lesson narration script.
//!
//! A missing script file is not an error; the step is skipped and the
//! Assemble step falls back to ascending slide-id ordering.

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};
use crate::script;

/// ParseScript step for script tokenization.
pub struct ParseScriptStep;

impl PipelineStep for ParseScriptStep {
    fn name(&self) -> &str {
        "ParseScript"
    }

    fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let path = match &ctx.lesson.script {
            Some(path) => path,
            None => {
                return Ok(StepOutcome::Skipped(
                    "no script file; fallback ordering will be used".to_string(),
                ));
            }
        };

        let text = std::fs::read_to_string(path)
            .map_err(|e| StepError::io_error(format!("reading {}", path.display()), e))?;

        let tokens = script::parse(&text);
        let texts = script::slide_texts(&text);
        tracing::info!(
            "parsed {} tokens, narration for {} slides",
            tokens.len(),
            texts.len()
        );

        state.tokens = Some(tokens);
        state.slide_texts = Some(texts);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.tokens.is_none() {
            return Err(StepError::invalid_output("script tokens not recorded"));
        }
        Ok(())
    }
}
