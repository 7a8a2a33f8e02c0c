//! Discover step - scans the lesson directory for slide assets.
//!
//! Fills the job state with the image map (frames/), the audio map with
//! probed durations (audios/), and nothing else. Whether the discovered
//! sets are sufficient is decided later, against the script, by the
//! Assemble step.

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};
use crate::timeline::{probe_audio_durations, scan_slide_audio_files, scan_slide_images};

/// Discover step for slide asset scanning.
pub struct DiscoverStep;

impl PipelineStep for DiscoverStep {
    fn name(&self) -> &str {
        "Discover"
    }

    fn validate_input(&self, ctx: &Context, _state: &JobState) -> StepResult<()> {
        if !ctx.lesson.root.is_dir() {
            return Err(StepError::file_not_found(
                ctx.lesson.root.display().to_string(),
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let images = scan_slide_images(&ctx.lesson.frames_dir)?;
        tracing::info!(
            "found {} slide images in {}",
            images.len(),
            ctx.lesson.frames_dir.display()
        );

        let audio_files = scan_slide_audio_files(&ctx.lesson.audio_dir)?;
        let audio = probe_audio_durations(&audio_files)?;
        tracing::info!(
            "found {} narration clips in {}",
            audio.len(),
            ctx.lesson.audio_dir.display()
        );

        state.images = Some(images);
        state.audio = Some(audio);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if !state.has_assets() {
            return Err(StepError::invalid_output("asset maps not recorded"));
        }
        Ok(())
    }
}
