//! Silence-based audio segmentation engine.
//!
//! Cuts one continuous narration track into per-slide clips at inferred
//! silence boundaries.
//!
//! # Architecture
//!
//! Pure planning functions composed by a thin run orchestrator:
//!
//! 1. **Waveform source** (`ffmpeg`): decode the track to mono f64 samples
//!    via an FFmpeg pipe.
//! 2. **Silence scan** (`silence`): state-machine run detection, duration
//!    filter, spike-gap merge, midpoint cut points, gapless partition.
//! 3. **Run orchestration** (`segmenter`): decode → plan → write
//!    `slide_NN.wav` files, or report cut points without I/O in dry-run
//!    mode.
//!
//! Dry-run and real runs share the same [`plan_segments`] call, so the cut
//! points they report can never diverge.

mod ffmpeg;
mod segmenter;
mod silence;
pub mod types;

// Re-export main types from types module
pub use types::{
    AudioData, AudioSegment, SegmentationError, SegmentationResult, SilenceInterval,
};

// Re-export the silence planner
pub use silence::{
    detect_silences, plan_segments, SegmentationPlan, SilenceConfig, MERGE_GAP_SECS,
    MIN_SEGMENT_SECS,
};

// Re-export the run orchestrator
pub use segmenter::{
    segment_file, DryRunReport, SegmentSpan, SegmentationOutcome, SilenceSpan,
};

// Re-export FFmpeg functions
pub use ffmpeg::{decode_audio, get_duration, DEFAULT_DETECTION_SAMPLE_RATE};
