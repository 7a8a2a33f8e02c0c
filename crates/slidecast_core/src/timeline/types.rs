//! Timeline entry types and assembly errors.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::{NamingError, PauseKind, SlideId};

/// A per-slide audio clip with its probed duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioRef {
    pub path: PathBuf,
    pub duration_secs: f64,
}

impl AudioRef {
    pub fn new(path: impl Into<PathBuf>, duration_secs: f64) -> Self {
        Self {
            path: path.into(),
            duration_secs,
        }
    }
}

/// What a timeline entry renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A primary slide entry (image and/or narration audio).
    Slide,
    /// A scripted pause re-showing the previous slide image.
    FreezeFrame,
    /// A pre-produced external clip.
    Vignette,
}

/// One renderable clip descriptor.
///
/// The assembled entry list is the sole input handed to the encoder and is
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub kind: EntryKind,
    /// Slide this entry shows (None for vignettes).
    pub slide_id: Option<SlideId>,
    /// Rendered slide image to display.
    pub image: Option<PathBuf>,
    /// Narration audio bound to this entry.
    pub audio: Option<AudioRef>,
    /// Pause kind that produced or sized this entry, if any.
    pub pause: Option<PauseKind>,
    /// External vignette clip (vignette entries only).
    pub clip: Option<PathBuf>,
    /// Resolved duration in seconds. None only for vignette entries,
    /// which play at their clip's native length.
    pub duration_secs: Option<f64>,
}

impl TimelineEntry {
    /// Whether this entry is a vignette.
    pub fn is_vignette(&self) -> bool {
        self.kind == EntryKind::Vignette
    }

    pub(crate) fn slide(
        slide_id: SlideId,
        image: Option<PathBuf>,
        audio: Option<AudioRef>,
        duration_secs: Option<f64>,
    ) -> Self {
        Self {
            kind: EntryKind::Slide,
            slide_id: Some(slide_id),
            image,
            audio,
            pause: None,
            clip: None,
            duration_secs,
        }
    }

    pub(crate) fn freeze_frame(
        slide_id: Option<SlideId>,
        image: PathBuf,
        pause: PauseKind,
        duration_secs: f64,
    ) -> Self {
        Self {
            kind: EntryKind::FreezeFrame,
            slide_id,
            image: Some(image),
            audio: None,
            pause: Some(pause),
            clip: None,
            duration_secs: Some(duration_secs),
        }
    }

    pub(crate) fn vignette(clip: &Path) -> Self {
        Self {
            kind: EntryKind::Vignette,
            slide_id: None,
            image: None,
            audio: None,
            pause: None,
            clip: Some(clip.to_path_buf()),
            duration_secs: None,
        }
    }
}

/// Error types for timeline assembly.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// A slide marker references an id with neither image nor audio.
    /// Fatal: a silent gap would desynchronize the rest of the deck.
    #[error("slide {slide} has neither audio nor image available")]
    MissingAsset { slide: SlideId },

    /// A slide id appeared more than once as a primary entry.
    #[error("slide {slide} appears more than once in the script")]
    DuplicateSlide { slide: SlideId },

    /// Fallback mode found no slide ids to order.
    #[error("no slide audio or images discovered; nothing to assemble")]
    NoSlides,
}

/// Type alias for assembly results.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Error types for asset discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A file carries a slide media extension but breaks the naming
    /// convention. Rejected loudly rather than skipped.
    #[error("non-conforming file in {dir}: {source}")]
    NonConformingName {
        dir: PathBuf,
        #[source]
        source: NamingError,
    },

    /// Two files map to the same slide id (e.g. slide_01.wav and
    /// slide_01.mp3).
    #[error("slide {slide} has multiple files ({first} and {second})")]
    DuplicateIndex {
        slide: SlideId,
        first: PathBuf,
        second: PathBuf,
    },

    /// Probing a clip's duration failed.
    #[error("failed to probe duration of {path}: {message}")]
    Probe { path: PathBuf, message: String },

    /// IO error while scanning.
    #[error("IO error scanning {dir}: {source}")]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for discovery results.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
