//! Slidecast core - narrated slide video assembly.
//!
//! This crate contains all business logic with zero CLI dependencies:
//! silence-based segmentation of a narration track, script token parsing,
//! timeline assembly, and the ffmpeg encoding boundary. It can be used by
//! the `slidecast` CLI or embedded in another tool.

pub mod config;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod script;
pub mod segmentation;
pub mod timeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
