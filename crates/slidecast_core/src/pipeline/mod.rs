//! Pipeline orchestrator for building lesson videos.
//!
//! This module provides the infrastructure for running the multi-step
//! lesson build. Each job consists of a sequence of steps that validate,
//! execute, and record their results.
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Discover      scan frames/ and audios/, probe durations
//!     ├── Step: ParseScript   tokenize the narration script
//!     ├── Step: Assemble      build the timeline entry sequence
//!     └── Step: Encode        render with ffmpeg
//! ```
//!
//! # Example
//!
//! ```no_run
//! use slidecast_core::config::Settings;
//! use slidecast_core::pipeline::{run_lesson, LessonPaths};
//! use std::path::Path;
//!
//! let settings = Settings::default();
//! let state = run_lesson(Path::new("lessons/lesson_07"), &settings).unwrap();
//! println!("wrote {}", state.output.unwrap().display());
//! ```

mod errors;
mod paths;
mod runner;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use paths::LessonPaths;
pub use runner::{CancelHandle, Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{AssembleStep, DiscoverStep, EncodeStep, ParseScriptStep};
pub use types::{Context, JobState, ProgressCallback, StepOutcome};

use std::path::Path;

use crate::config::Settings;

/// Create the standard lesson build pipeline.
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(DiscoverStep)
        .with_step(ParseScriptStep)
        .with_step(AssembleStep)
        .with_step(EncodeStep)
}

/// Run the full build for one lesson directory.
///
/// Convenience wrapper that resolves the lesson layout, runs the standard
/// pipeline, and returns the final job state.
pub fn run_lesson(lesson_dir: &Path, settings: &Settings) -> PipelineResult<JobState> {
    let lesson = LessonPaths::discover(lesson_dir, &settings.paths.output_subdir)
        .map_err(|e| PipelineError::setup_failed(lesson_dir.display().to_string(), e.to_string()))?;

    let ctx = Context::new(lesson, settings.clone());
    let mut state = JobState::new();
    create_standard_pipeline().run(&ctx, &mut state)?;
    Ok(state)
}
