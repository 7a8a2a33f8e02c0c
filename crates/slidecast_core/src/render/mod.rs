//! Final video rendering via ffmpeg.

mod encoder;

pub use encoder::{
    encode, EncodeSettings, FfmpegArgsBuilder, RenderError, RenderResult,
};
