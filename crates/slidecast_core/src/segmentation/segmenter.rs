//! Segmentation run orchestration: decode, plan, then write or report.
//!
//! A run either fully completes or writes nothing: decode and planning
//! errors surface before the first file is touched. The one documented
//! exception is an export failure mid-run, which keeps the segments
//! already written (reported, never silently cleaned up).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::SlideId;

use super::ffmpeg;
use super::silence::{plan_segments, SegmentationPlan, SilenceConfig};
use super::types::{SegmentationError, SegmentationResult};

/// One silence run of a dry-run report, in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct SilenceSpan {
    pub start_secs: f64,
    pub end_secs: f64,
    pub duration_secs: f64,
}

/// One planned segment of a dry-run report, in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentSpan {
    pub index: usize,
    pub start_secs: f64,
    pub end_secs: f64,
    pub duration_secs: f64,
}

/// Report of where a run would cut, produced without any file I/O.
#[derive(Debug, Clone, Serialize)]
pub struct DryRunReport {
    pub source: PathBuf,
    pub silences: Vec<SilenceSpan>,
    pub cut_points_secs: Vec<f64>,
    pub segments: Vec<SegmentSpan>,
}

impl DryRunReport {
    fn from_plan(source: &Path, plan: &SegmentationPlan) -> Self {
        let rate = plan.sample_rate as f64;
        Self {
            source: source.to_path_buf(),
            silences: plan
                .silences
                .iter()
                .map(|s| SilenceSpan {
                    start_secs: s.start_sample as f64 / rate,
                    end_secs: s.end_sample as f64 / rate,
                    duration_secs: s.len() as f64 / rate,
                })
                .collect(),
            cut_points_secs: plan.cut_secs(),
            segments: plan
                .segments
                .iter()
                .map(|s| SegmentSpan {
                    index: s.index,
                    start_secs: s.start_sample as f64 / rate,
                    end_secs: s.end_sample as f64 / rate,
                    duration_secs: s.len() as f64 / rate,
                })
                .collect(),
        }
    }
}

/// Outcome of one segmentation run.
#[derive(Debug)]
pub enum SegmentationOutcome {
    /// Dry run: the cut report, no files written.
    DryRun(DryRunReport),
    /// Real run: paths of the written segment files, in index order.
    Written(Vec<PathBuf>),
}

/// Segment one narration track at inferred silence boundaries.
///
/// Decodes the source, plans cut points, and either reports them
/// (`dry_run`) or writes `slide_NN.wav` files into `out_dir`. Dry-run and
/// real-run share the planning step, so their cut points are identical by
/// construction.
pub fn segment_file(
    input_path: &Path,
    out_dir: &Path,
    config: &SilenceConfig,
    detection_sample_rate: u32,
    dry_run: bool,
) -> SegmentationResult<SegmentationOutcome> {
    config.validate()?;

    let audio = ffmpeg::decode_audio(input_path, detection_sample_rate)?;
    let plan = plan_segments(&audio, config)?;

    tracing::info!(
        "{}: {} qualifying silence(s), {} segment(s)",
        input_path.display(),
        plan.silences.len(),
        plan.segments.len()
    );

    if dry_run {
        return Ok(SegmentationOutcome::DryRun(DryRunReport::from_plan(
            input_path, &plan,
        )));
    }

    std::fs::create_dir_all(out_dir)?;

    let rate = plan.sample_rate as f64;
    let mut written: Vec<PathBuf> = Vec::with_capacity(plan.segments.len());
    for segment in &plan.segments {
        let slide = SlideId::new(segment.index as u32);
        let out_path = out_dir.join(format!("{}.wav", slide.file_stem()));
        let start_secs = segment.start_sample as f64 / rate;
        let duration_secs = segment.len() as f64 / rate;

        if let Err(e) =
            ffmpeg::export_segment(input_path, &out_path, segment.index, start_secs, duration_secs)
        {
            // Already-written segments stay on disk; report and stop.
            tracing::error!(
                "Export failed at segment {}; {} segment(s) already written remain in {}",
                segment.index,
                written.len(),
                out_dir.display()
            );
            return Err(e);
        }

        tracing::info!(
            "  {} ({:.2}s -> {:.2}s, {:.2}s)",
            out_path.display(),
            start_secs,
            start_secs + duration_secs,
            duration_secs
        );
        written.push(out_path);
    }

    Ok(SegmentationOutcome::Written(written))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_report_mirrors_plan() {
        use crate::segmentation::types::AudioData;

        let mut samples = vec![0.5; 10_000];
        samples.extend(vec![0.0; 6_500]);
        samples.extend(vec![0.5; 10_000]);
        let audio = AudioData::new(samples, 1000);

        let cfg = SilenceConfig {
            min_silence_secs: 6.0,
            amplitude_threshold: 0.01,
        };
        let plan = plan_segments(&audio, &cfg).unwrap();
        let report = DryRunReport::from_plan(Path::new("narration.wav"), &plan);

        assert_eq!(report.segments.len(), plan.segments.len());
        assert_eq!(report.cut_points_secs.len(), 1);
        assert!((report.cut_points_secs[0] - 13.25).abs() < 1e-9);
        assert!((report.silences[0].duration_secs - 6.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_config_fails_before_decode() {
        let cfg = SilenceConfig {
            min_silence_secs: -1.0,
            amplitude_threshold: 0.01,
        };
        // The input path does not exist; config validation must win.
        let err = segment_file(
            Path::new("/nonexistent/narration.wav"),
            Path::new("/tmp/out"),
            &cfg,
            16000,
            true,
        )
        .unwrap_err();
        assert!(matches!(err, SegmentationError::InvalidConfig { .. }));
    }
}
