//! Core types for silence-based audio segmentation.

use serde::Serialize;

/// Audio data decoded from a narration track.
///
/// Owned exclusively by one segmentation run and discarded afterwards.
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples as f64 in [-1, 1] (mono).
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Duration in seconds.
    pub duration_secs: f64,
}

impl AudioData {
    /// Create new audio data from samples.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        let duration_secs = samples.len() as f64 / sample_rate as f64;
        Self {
            samples,
            sample_rate,
            duration_secs,
        }
    }

    /// Get the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if audio data is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Convert a sample index to seconds.
    pub fn secs_at(&self, sample: usize) -> f64 {
        sample as f64 / self.sample_rate as f64
    }
}

/// A contiguous run of samples at or below the amplitude threshold.
///
/// Invariant: `end_sample > start_sample`; intervals in a plan are
/// non-overlapping and sorted by `start_sample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SilenceInterval {
    /// First silent sample (inclusive).
    pub start_sample: usize,
    /// One past the last silent sample (exclusive).
    pub end_sample: usize,
}

impl SilenceInterval {
    /// Length of the interval in samples.
    pub fn len(&self) -> usize {
        self.end_sample - self.start_sample
    }

    /// Whether the interval is empty (never true for a valid interval).
    pub fn is_empty(&self) -> bool {
        self.end_sample <= self.start_sample
    }

    /// Duration of the interval in seconds at the given sample rate.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        self.len() as f64 / sample_rate as f64
    }

    /// Midpoint sample index, the cut point for this silence.
    pub fn midpoint(&self) -> usize {
        self.start_sample + self.len() / 2
    }
}

/// One audio segment of the partitioned track.
///
/// Invariant: segments are contiguous and gapless; `index` is 1-based,
/// strictly increasing, and dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioSegment {
    /// 1-based segment index (maps to `slide_NN`).
    pub index: usize,
    /// First sample (inclusive).
    pub start_sample: usize,
    /// One past the last sample (exclusive).
    pub end_sample: usize,
}

impl AudioSegment {
    /// Length of the segment in samples.
    pub fn len(&self) -> usize {
        self.end_sample - self.start_sample
    }

    /// Whether the segment is empty.
    pub fn is_empty(&self) -> bool {
        self.end_sample <= self.start_sample
    }

    /// Duration of the segment in seconds at the given sample rate.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        self.len() as f64 / sample_rate as f64
    }
}

/// Error types for segmentation operations.
#[derive(Debug, thiserror::Error)]
pub enum SegmentationError {
    /// Source file not found.
    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    /// The source audio could not be decoded. Fatal before any output.
    #[error("Audio decode failed: {0}")]
    Decode(String),

    /// FFmpeg execution failed while exporting a segment.
    #[error("Segment {index} export failed: {message}")]
    Export { index: usize, message: String },

    /// A tunable is outside its valid range.
    #[error("Invalid {parameter} = {value}: {reason}")]
    InvalidConfig {
        parameter: &'static str,
        value: f64,
        reason: String,
    },

    /// The silence configuration produced a zero or near-zero segment.
    #[error(
        "Degenerate segment {index} ({start_secs:.2}s -> {end_secs:.2}s); \
         min_silence_secs/amplitude_threshold produce cuts too close together"
    )]
    DegenerateSegment {
        index: usize,
        start_secs: f64,
        end_secs: f64,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for segmentation results.
pub type SegmentationResult<T> = Result<T, SegmentationError>;
