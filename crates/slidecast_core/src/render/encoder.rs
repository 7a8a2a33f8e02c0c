//! ffmpeg command builder and encode runner.
//!
//! The argument list for the final encode is built as pure data by
//! [`FfmpegArgsBuilder`] so it can be inspected and tested without running
//! ffmpeg. Each timeline entry becomes one or two ffmpeg inputs:
//!
//! - image-backed entries: a looped still (`-loop 1 -t <dur> -i <image>`)
//!   plus either the narration file or a generated silent track
//! - audio-only entries: a black color source plus the narration file
//! - vignettes: the clip itself, supplying both streams
//!
//! All inputs are normalized in one `filter_complex` graph (oversampled
//! scale, pad, fps, audio resample) and joined with the concat filter.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::timeline::TimelineEntry;

/// Output encode parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// x264 constant rate factor. Ignored when `bitrate` is set.
    #[serde(default = "default_crf")]
    pub crf: u32,
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Explicit video bitrate (e.g. "6M"). Overrides CRF mode.
    #[serde(default)]
    pub bitrate: Option<String>,
    /// Stills are scaled at this multiple before the final downscale,
    /// which keeps text edges sharp after yuv420p conversion.
    #[serde(default = "default_oversample")]
    pub oversample: f64,
    #[serde(default = "default_audio_sample_rate")]
    pub audio_sample_rate: u32,
    /// Short fade applied to each clip's audio to avoid boundary clicks.
    #[serde(default = "default_audio_fade")]
    pub audio_fade_secs: f64,
}

fn default_width() -> u32 {
    1920
}
fn default_height() -> u32 {
    1080
}
fn default_fps() -> u32 {
    30
}
fn default_crf() -> u32 {
    16
}
fn default_preset() -> String {
    "slow".to_string()
}
fn default_oversample() -> f64 {
    2.0
}
fn default_audio_sample_rate() -> u32 {
    44100
}
fn default_audio_fade() -> f64 {
    0.05
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            crf: default_crf(),
            preset: default_preset(),
            bitrate: None,
            oversample: default_oversample(),
            audio_sample_rate: default_audio_sample_rate(),
            audio_fade_secs: default_audio_fade(),
        }
    }
}

/// Error types for rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("timeline is empty; nothing to encode")]
    EmptyTimeline,

    #[error("invalid encode setting {parameter}: {reason}")]
    InvalidSettings {
        parameter: &'static str,
        reason: String,
    },

    #[error("ffmpeg encode failed: {message}")]
    Encode { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for render results.
pub type RenderResult<T> = Result<T, RenderError>;

/// Builder for the final ffmpeg encode command arguments.
pub struct FfmpegArgsBuilder<'a> {
    timeline: &'a [TimelineEntry],
    settings: &'a EncodeSettings,
    output_path: &'a Path,
}

impl<'a> FfmpegArgsBuilder<'a> {
    pub fn new(
        timeline: &'a [TimelineEntry],
        settings: &'a EncodeSettings,
        output_path: &'a Path,
    ) -> Self {
        Self {
            timeline,
            settings,
            output_path,
        }
    }

    /// Build the complete ffmpeg argument list.
    pub fn build(&self) -> RenderResult<Vec<String>> {
        if self.timeline.is_empty() {
            return Err(RenderError::EmptyTimeline);
        }
        self.validate_settings()?;

        let mut args: Vec<String> = Vec::new();
        // (video input index, audio input index) per entry, in order.
        let mut streams: Vec<(usize, usize)> = Vec::with_capacity(self.timeline.len());

        self.add_inputs(&mut args, &mut streams);
        self.add_filter_complex(&mut args, &streams);
        self.add_output_options(&mut args);

        Ok(args)
    }

    fn validate_settings(&self) -> RenderResult<()> {
        let s = self.settings;
        if s.width == 0 || s.height == 0 {
            return Err(RenderError::InvalidSettings {
                parameter: "width/height",
                reason: format!("{}x{}", s.width, s.height),
            });
        }
        if s.fps == 0 {
            return Err(RenderError::InvalidSettings {
                parameter: "fps",
                reason: "must be positive".to_string(),
            });
        }
        if s.oversample < 1.0 {
            return Err(RenderError::InvalidSettings {
                parameter: "oversample",
                reason: format!("{} is below 1.0", s.oversample),
            });
        }
        Ok(())
    }

    fn add_inputs(&self, args: &mut Vec<String>, streams: &mut Vec<(usize, usize)>) {
        let s = self.settings;
        let mut next = 0usize;

        for entry in self.timeline {
            if let Some(clip) = &entry.clip {
                args.push("-i".to_string());
                args.push(clip.to_string_lossy().to_string());
                streams.push((next, next));
                next += 1;
                continue;
            }

            // Resolved entries always carry a duration by this point.
            let duration = entry.duration_secs.unwrap_or(0.0);

            match &entry.image {
                Some(image) => {
                    args.push("-loop".to_string());
                    args.push("1".to_string());
                    args.push("-t".to_string());
                    args.push(format_secs(duration));
                    args.push("-i".to_string());
                    args.push(image.to_string_lossy().to_string());
                }
                None => {
                    args.push("-f".to_string());
                    args.push("lavfi".to_string());
                    args.push("-t".to_string());
                    args.push(format_secs(duration));
                    args.push("-i".to_string());
                    args.push(format!(
                        "color=c=black:s={}x{}:r={}",
                        s.width, s.height, s.fps
                    ));
                }
            }
            let video_idx = next;
            next += 1;

            match &entry.audio {
                Some(audio) => {
                    args.push("-i".to_string());
                    args.push(audio.path.to_string_lossy().to_string());
                }
                None => {
                    args.push("-f".to_string());
                    args.push("lavfi".to_string());
                    args.push("-t".to_string());
                    args.push(format_secs(duration));
                    args.push("-i".to_string());
                    args.push(format!(
                        "anullsrc=channel_layout=stereo:sample_rate={}",
                        s.audio_sample_rate
                    ));
                }
            }
            streams.push((video_idx, next));
            next += 1;
        }
    }

    fn add_filter_complex(&self, args: &mut Vec<String>, streams: &[(usize, usize)]) {
        let s = self.settings;
        let over_w = (s.width as f64 * s.oversample).round() as u32;
        let over_h = (s.height as f64 * s.oversample).round() as u32;

        let mut graph = String::new();
        for (n, (entry, &(vi, ai))) in self.timeline.iter().zip(streams).enumerate() {
            graph.push_str(&format!(
                "[{vi}:v]scale={over_w}:{over_h}:force_original_aspect_ratio=decrease,\
                 pad={over_w}:{over_h}:(ow-iw)/2:(oh-ih)/2,\
                 scale={w}:{h},setsar=1,fps={fps},format=yuv420p[v{n}];",
                w = s.width,
                h = s.height,
                fps = s.fps,
            ));

            graph.push_str(&format!(
                "[{ai}:a]aresample={ar},aformat=sample_fmts=fltp:channel_layouts=stereo",
                ar = s.audio_sample_rate,
            ));
            if s.audio_fade_secs > 0.0 {
                graph.push_str(&format!(
                    ",afade=t=in:st=0:d={}",
                    format_secs(s.audio_fade_secs)
                ));
                // Fade-out needs a known end; vignettes play out unfaded.
                if let Some(duration) = entry.duration_secs {
                    let start = (duration - s.audio_fade_secs).max(0.0);
                    graph.push_str(&format!(
                        ",afade=t=out:st={}:d={}",
                        format_secs(start),
                        format_secs(s.audio_fade_secs)
                    ));
                }
            }
            graph.push_str(&format!("[a{n}];"));
        }

        for n in 0..self.timeline.len() {
            graph.push_str(&format!("[v{n}][a{n}]"));
        }
        graph.push_str(&format!(
            "concat=n={}:v=1:a=1[vout][aout]",
            self.timeline.len()
        ));

        args.push("-filter_complex".to_string());
        args.push(graph);
        args.push("-map".to_string());
        args.push("[vout]".to_string());
        args.push("-map".to_string());
        args.push("[aout]".to_string());
    }

    fn add_output_options(&self, args: &mut Vec<String>) {
        let s = self.settings;

        args.push("-c:v".to_string());
        args.push("libx264".to_string());
        args.push("-r".to_string());
        args.push(s.fps.to_string());
        args.push("-pix_fmt".to_string());
        args.push("yuv420p".to_string());

        match &s.bitrate {
            Some(bitrate) => {
                args.push("-b:v".to_string());
                args.push(bitrate.clone());
            }
            None => {
                args.push("-crf".to_string());
                args.push(s.crf.to_string());
                args.push("-preset".to_string());
                args.push(s.preset.clone());
            }
        }

        args.push("-c:a".to_string());
        args.push("aac".to_string());
        args.push("-b:a".to_string());
        args.push("192k".to_string());
        args.push("-ar".to_string());
        args.push(s.audio_sample_rate.to_string());

        args.push("-movflags".to_string());
        args.push("+faststart".to_string());
        args.push("-y".to_string());
        args.push(self.output_path.to_string_lossy().to_string());
    }
}

/// Run the final encode with ffmpeg.
pub fn encode(
    timeline: &[TimelineEntry],
    settings: &EncodeSettings,
    output_path: &Path,
) -> RenderResult<()> {
    let args = FfmpegArgsBuilder::new(timeline, settings, output_path).build()?;
    tracing::info!(
        "encoding {} timeline entries to {}",
        timeline.len(),
        output_path.display()
    );
    tracing::debug!("ffmpeg args: {}", args.join(" "));

    let output = Command::new("ffmpeg").args(&args).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(10)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(RenderError::Encode { message: tail });
    }
    Ok(())
}

/// Seconds formatted with millisecond precision, no trailing zeros noise.
fn format_secs(secs: f64) -> String {
    let formatted = format!("{:.3}", secs);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
