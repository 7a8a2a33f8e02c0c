//! Script token parser.
//!
//! Converts raw script text into an ordered sequence of typed tokens
//! (slide markers, pauses, vignette, narration spans). The document-tag
//! stripping that produces the raw text is an external concern; this
//! module consumes plain text.

mod parser;
mod types;

pub use parser::{parse, slide_texts};
pub use types::{has_slide_markers, ScriptToken};
