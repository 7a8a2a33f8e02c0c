//! Core enums used throughout the library.

use serde::{Deserialize, Serialize};

/// Kind of scripted pause between narration spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseKind {
    /// Brief beat, e.g. between sentences.
    Short,
    /// Longer hold, e.g. while the viewer reads a dense slide.
    Long,
}

impl std::fmt::Display for PauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PauseKind::Short => write!(f, "short_pause"),
            PauseKind::Long => write!(f, "long_pause"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_kind_displays_tag_names() {
        assert_eq!(PauseKind::Short.to_string(), "short_pause");
        assert_eq!(PauseKind::Long.to_string(), "long_pause");
    }
}
