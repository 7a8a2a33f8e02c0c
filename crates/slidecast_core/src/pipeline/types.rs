//! Core types for the lesson pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::Settings;
use crate::models::SlideId;
use crate::script::ScriptToken;
use crate::timeline::{AudioRef, TimelineEntry};

use super::paths::LessonPaths;

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Contains job configuration and shared resources that steps can read
/// but not modify. Mutable state goes in `JobState`.
pub struct Context {
    /// Resolved lesson directory layout.
    pub lesson: LessonPaths,
    /// Application settings.
    pub settings: Settings,
    /// Job name/identifier.
    pub job_name: String,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    /// Create a new context for a lesson job.
    pub fn new(lesson: LessonPaths, settings: Settings) -> Self {
        let job_name = lesson.job_name();
        Self {
            lesson,
            settings,
            job_name,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to the callback (if set).
    pub fn report_progress(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, percent, message);
        }
    }
}

/// Mutable job state that accumulates results from pipeline steps.
///
/// This is the write-once manifest: steps add new data but do not
/// overwrite values recorded by earlier steps.
#[derive(Debug, Default, Serialize)]
pub struct JobState {
    /// When the job started.
    pub started_at: Option<String>,
    /// Discovered slide images (from the Discover step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<BTreeMap<SlideId, PathBuf>>,
    /// Discovered narration audio with probed durations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<BTreeMap<SlideId, AudioRef>>,
    /// Parsed script tokens (from the ParseScript step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<ScriptToken>>,
    /// Per-slide narration text extracted from the script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_texts: Option<BTreeMap<SlideId, String>>,
    /// Assembled timeline (from the Assemble step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEntry>>,
    /// Final video path (from the Encode step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl JobState {
    pub fn new() -> Self {
        Self {
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if discovery has been completed.
    pub fn has_assets(&self) -> bool {
        self.images.is_some() && self.audio.is_some()
    }

    /// Check if the timeline has been assembled.
    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (preconditions not met, but not an error).
    Skipped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_state_tracks_completion() {
        let mut state = JobState::new();
        assert!(!state.has_assets());
        assert!(!state.has_timeline());

        state.images = Some(BTreeMap::new());
        state.audio = Some(BTreeMap::new());
        state.timeline = Some(Vec::new());

        assert!(state.has_assets());
        assert!(state.has_timeline());
    }

    #[test]
    fn job_state_serializes_without_empty_sections() {
        let state = JobState::new();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("started_at"));
        assert!(!json.contains("timeline"));
    }
}
