//! Slide identity and the `slide_NN.<ext>` naming contract.
//!
//! Slide order is carried entirely by zero-padded filenames
//! (`slide_01.wav`, `slide_02.png`, ...). That implicit contract is made
//! explicit here: one validated parsing function, used by every directory
//! scan, that rejects non-conforming names instead of skipping them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Audio file extensions accepted for per-slide narration clips.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "aac", "flac", "ogg"];

/// Image file extensions accepted for rendered slide frames.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Identifier of a slide, as carried by `[slide_NN]` markers and
/// `slide_NN.<ext>` filenames.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SlideId(u32);

impl SlideId {
    /// Create a slide id from its 1-based number.
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The underlying slide number.
    pub fn number(&self) -> u32 {
        self.0
    }

    /// File stem for this slide (`slide_01`, `slide_02`, ...).
    pub fn file_stem(&self) -> String {
        format!("slide_{:02}", self.0)
    }
}

impl std::fmt::Display for SlideId {
    /// Zero-padded to two digits, matching the marker/filename vocabulary.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Errors from parsing slide filenames.
#[derive(Error, Debug)]
pub enum NamingError {
    /// The stem does not follow `slide_<NN>`.
    #[error("'{name}' does not follow the slide_<NN> naming convention")]
    NotSlideName { name: String },

    /// The index part is not a zero-padded number of at least two digits.
    #[error("'{name}' has a malformed slide index (expected at least two zero-padded digits)")]
    MalformedIndex { name: String },

    /// The extension is not in the allowed set.
    #[error("'{name}' has unsupported extension (allowed: {allowed})")]
    UnsupportedExtension { name: String, allowed: String },
}

/// Parse a `slide_NN.<ext>` filename into its slide id.
///
/// `allowed_extensions` is the lowercase extension vocabulary for the scan
/// (audio or image). The index must be at least two digits, zero-padded;
/// `slide_1.wav` is a loud error, not a near-miss to tolerate, because
/// lexicographic and numeric ordering diverge for unpadded names.
pub fn parse_slide_filename(
    name: &str,
    allowed_extensions: &[&str],
) -> Result<SlideId, NamingError> {
    let (stem, ext) = name.rsplit_once('.').ok_or_else(|| NamingError::NotSlideName {
        name: name.to_string(),
    })?;

    if !allowed_extensions.contains(&ext.to_ascii_lowercase().as_str()) {
        return Err(NamingError::UnsupportedExtension {
            name: name.to_string(),
            allowed: allowed_extensions.join(", "),
        });
    }

    let index = stem
        .strip_prefix("slide_")
        .ok_or_else(|| NamingError::NotSlideName {
            name: name.to_string(),
        })?;

    if index.len() < 2 || !index.chars().all(|c| c.is_ascii_digit()) {
        return Err(NamingError::MalformedIndex {
            name: name.to_string(),
        });
    }

    let number: u32 = index.parse().map_err(|_| NamingError::MalformedIndex {
        name: name.to_string(),
    })?;

    Ok(SlideId::new(number))
}
