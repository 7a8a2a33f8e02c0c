//! Script token types.

use serde::Serialize;

use crate::models::{PauseKind, SlideId};

/// One token of a narration script, in document reading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptToken {
    /// `[slide_NN]` marker.
    Slide(SlideId),
    /// `[short_pause]` / `[long_pause]` marker.
    Pause(PauseKind),
    /// `[vignette]` marker.
    Vignette,
    /// Narration text between markers. Not consumed by timeline assembly;
    /// it feeds the external audio-generation step.
    Text(String),
}

impl ScriptToken {
    /// Whether this token is a slide marker.
    pub fn is_slide(&self) -> bool {
        matches!(self, ScriptToken::Slide(_))
    }
}

/// Whether a token sequence can drive token-mode assembly.
pub fn has_slide_markers(tokens: &[ScriptToken]) -> bool {
    tokens.iter().any(ScriptToken::is_slide)
}
