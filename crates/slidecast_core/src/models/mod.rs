//! Data models shared across the slidecast engines.
//!
//! - Enums for pause kinds
//! - Slide identity and the `slide_NN.<ext>` naming contract

mod enums;
mod slides;

// Re-export all public types
pub use enums::PauseKind;
pub use slides::{
    parse_slide_filename, NamingError, SlideId, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS,
};
