//! Timeline assembly engine.
//!
//! Turns discovered per-slide assets (images, narration audio, optional
//! vignette clip) plus parsed script tokens into the ordered list of
//! renderable [`TimelineEntry`] values the encoder consumes.
//!
//! - `discovery`: filesystem scans under the slide naming convention.
//! - `assembler`: the pure token-driven and fallback assembly functions.

mod assembler;
mod discovery;
mod types;

pub use assembler::{assemble, AssemblyInput, PauseDurations, MIN_CLIP_SECS};
pub use discovery::{probe_audio_durations, scan_slide_audio_files, scan_slide_images};
pub use types::{
    AssemblyError, AssemblyResult, AudioRef, DiscoveryError, DiscoveryResult, EntryKind,
    TimelineEntry,
};
