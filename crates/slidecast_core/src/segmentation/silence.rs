//! Silence detection and segment planning.
//!
//! Pure functions, no I/O: a linear scan over decoded samples produces
//! silence runs, qualifying runs yield cut points, and cut points yield a
//! gapless partition of the track. Dry-run and real segmentation both go
//! through [`plan_segments`], so they can never disagree on cut points.

use serde::{Deserialize, Serialize};

use super::types::{
    AudioData, AudioSegment, SegmentationError, SegmentationResult, SilenceInterval,
};

/// Silent runs separated by a shorter sound burst than this are merged.
/// Absorbs single-sample spikes and breath noise inside a long silence.
pub const MERGE_GAP_SECS: f64 = 0.3;

/// Segments shorter than this are treated as a configuration error.
pub const MIN_SEGMENT_SECS: f64 = 0.05;

/// Tunables for silence detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SilenceConfig {
    /// Minimum duration (seconds) for a silence run to qualify as a cut.
    pub min_silence_secs: f64,
    /// Amplitude at or below which a sample counts as silent (0-1).
    pub amplitude_threshold: f64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            min_silence_secs: 5.5,
            amplitude_threshold: 0.01,
        }
    }
}

impl SilenceConfig {
    /// Validate the tunables, reporting the offending parameter.
    pub fn validate(&self) -> SegmentationResult<()> {
        if !(self.min_silence_secs > 0.0) {
            return Err(SegmentationError::InvalidConfig {
                parameter: "min_silence_secs",
                value: self.min_silence_secs,
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.amplitude_threshold) {
            return Err(SegmentationError::InvalidConfig {
                parameter: "amplitude_threshold",
                value: self.amplitude_threshold,
                reason: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}

/// Scanner state while walking the sample stream.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    InSound,
    InSilence { start: usize },
}

/// Detect qualifying silence runs in the track.
///
/// 1. Classify each sample as silent when `abs(amplitude) <= threshold`.
/// 2. Run-length encode via an explicit {in-sound, in-silence} state machine.
/// 3. Keep runs lasting at least `min_silence_secs`.
/// 4. Merge qualifying runs separated by less than [`MERGE_GAP_SECS`].
///
/// Returned intervals are sorted and non-overlapping.
pub fn detect_silences(audio: &AudioData, config: &SilenceConfig) -> Vec<SilenceInterval> {
    let mut runs: Vec<SilenceInterval> = Vec::new();
    let mut state = ScanState::InSound;

    for (i, sample) in audio.samples.iter().enumerate() {
        let silent = sample.abs() <= config.amplitude_threshold;
        state = match (state, silent) {
            (ScanState::InSound, true) => ScanState::InSilence { start: i },
            (ScanState::InSilence { start }, false) => {
                runs.push(SilenceInterval {
                    start_sample: start,
                    end_sample: i,
                });
                ScanState::InSound
            }
            (other, _) => other,
        };
    }
    if let ScanState::InSilence { start } = state {
        runs.push(SilenceInterval {
            start_sample: start,
            end_sample: audio.len(),
        });
    }

    let min_samples = (config.min_silence_secs * audio.sample_rate as f64).ceil() as usize;
    runs.retain(|run| run.len() >= min_samples);

    merge_close_runs(runs, audio.sample_rate)
}

/// Merge silence runs separated by a sound gap shorter than [`MERGE_GAP_SECS`].
fn merge_close_runs(runs: Vec<SilenceInterval>, sample_rate: u32) -> Vec<SilenceInterval> {
    let gap_samples = (MERGE_GAP_SECS * sample_rate as f64).floor() as usize;
    let mut merged: Vec<SilenceInterval> = Vec::with_capacity(runs.len());

    for run in runs {
        match merged.last_mut() {
            Some(prev) if run.start_sample.saturating_sub(prev.end_sample) <= gap_samples => {
                prev.end_sample = run.end_sample;
            }
            _ => merged.push(run),
        }
    }
    merged
}

/// A fully planned segmentation of one track.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentationPlan {
    /// Qualifying silence runs, sorted.
    pub silences: Vec<SilenceInterval>,
    /// Cut point sample indices (midpoints of the silence runs).
    pub cut_samples: Vec<usize>,
    /// The resulting gapless partition, 1-based dense indices.
    pub segments: Vec<AudioSegment>,
    /// Sample rate the plan was computed at.
    pub sample_rate: u32,
    /// Total samples in the track.
    pub total_samples: usize,
}

impl SegmentationPlan {
    /// Cut points as second-level timestamps.
    pub fn cut_secs(&self) -> Vec<f64> {
        self.cut_samples
            .iter()
            .map(|&s| s as f64 / self.sample_rate as f64)
            .collect()
    }
}

/// Plan segment boundaries for the track.
///
/// Segments span between consecutive cut points, from track start to the
/// first cut and from the last cut to track end. With zero qualifying
/// silences, the whole track is segment 1.
///
/// If the final qualifying silence touches end-of-track, the last segment
/// ends at that run's start instead of its midpoint, so no all-silence
/// trailing segment is produced.
pub fn plan_segments(
    audio: &AudioData,
    config: &SilenceConfig,
) -> SegmentationResult<SegmentationPlan> {
    config.validate()?;
    if audio.is_empty() {
        return Err(SegmentationError::Decode(
            "no audio samples in source".to_string(),
        ));
    }

    let silences = detect_silences(audio, config);

    let mut cut_samples: Vec<usize> = Vec::with_capacity(silences.len());
    let mut track_end = audio.len();

    for (i, run) in silences.iter().enumerate() {
        let is_last = i == silences.len() - 1;
        if is_last && run.end_sample >= audio.len() {
            // Trailing silence: end the final segment where it begins.
            track_end = run.start_sample;
        } else {
            cut_samples.push(run.midpoint());
        }
    }

    let mut bounds = Vec::with_capacity(cut_samples.len() + 2);
    bounds.push(0);
    bounds.extend_from_slice(&cut_samples);
    bounds.push(track_end);

    let min_segment_samples =
        ((MIN_SEGMENT_SECS * audio.sample_rate as f64) as usize).max(1);

    let mut segments = Vec::with_capacity(bounds.len() - 1);
    for (i, window) in bounds.windows(2).enumerate() {
        let (start, end) = (window[0], window[1]);
        let index = i + 1;
        if end < start + min_segment_samples {
            return Err(SegmentationError::DegenerateSegment {
                index,
                start_secs: audio.secs_at(start),
                end_secs: audio.secs_at(end.max(start)),
            });
        }
        segments.push(AudioSegment {
            index,
            start_sample: start,
            end_sample: end,
        });
    }

    Ok(SegmentationPlan {
        silences,
        cut_samples,
        segments,
        sample_rate: audio.sample_rate,
        total_samples: audio.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 1000;

    fn track(spans: &[(f64, f64)]) -> AudioData {
        // Builds a track from (amplitude, seconds) spans.
        let mut samples = Vec::new();
        for &(amp, secs) in spans {
            samples.extend(std::iter::repeat(amp).take((secs * RATE as f64) as usize));
        }
        AudioData::new(samples, RATE)
    }

    fn cfg(min_silence: f64) -> SilenceConfig {
        SilenceConfig {
            min_silence_secs: min_silence,
            amplitude_threshold: 0.01,
        }
    }

    #[test]
    fn no_qualifying_silence_yields_single_segment() {
        let audio = track(&[(0.5, 10.0)]);
        let plan = plan_segments(&audio, &cfg(6.0)).unwrap();

        assert!(plan.silences.is_empty());
        assert!(plan.cut_samples.is_empty());
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].index, 1);
        assert_eq!(plan.segments[0].start_sample, 0);
        assert_eq!(plan.segments[0].end_sample, audio.len());
    }

    #[test]
    fn one_long_silence_cuts_at_midpoint() {
        // 10s speech, 6.5s silence at [10.0, 16.5], 10s speech.
        let audio = track(&[(0.5, 10.0), (0.0, 6.5), (0.5, 10.0)]);
        let plan = plan_segments(&audio, &cfg(6.0)).unwrap();

        assert_eq!(plan.segments.len(), 2);
        let t1 = 10_000usize;
        let t2 = 16_500usize;
        assert_eq!(plan.cut_samples, vec![(t1 + t2) / 2]);
        assert_eq!(plan.segments[0].start_sample, 0);
        assert_eq!(plan.segments[0].end_sample, (t1 + t2) / 2);
        assert_eq!(plan.segments[1].end_sample, audio.len());
    }

    #[test]
    fn short_silences_do_not_cut() {
        let audio = track(&[(0.5, 5.0), (0.0, 2.0), (0.5, 5.0)]);
        let plan = plan_segments(&audio, &cfg(6.0)).unwrap();
        assert_eq!(plan.segments.len(), 1);
    }

    #[test]
    fn segments_partition_the_track() {
        let audio = track(&[
            (0.5, 8.0),
            (0.0, 7.0),
            (0.4, 12.0),
            (0.0, 6.0),
            (0.3, 9.0),
        ]);
        let plan = plan_segments(&audio, &cfg(6.0)).unwrap();

        assert_eq!(plan.segments.len(), 3);
        assert_eq!(plan.segments[0].start_sample, 0);
        for pair in plan.segments.windows(2) {
            assert_eq!(pair[0].end_sample, pair[1].start_sample);
        }
        assert_eq!(plan.segments.last().unwrap().end_sample, audio.len());

        let total: usize = plan.segments.iter().map(|s| s.len()).sum();
        assert_eq!(total, audio.len());

        let indices: Vec<usize> = plan.segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn qualifying_runs_across_a_spike_are_merged() {
        // Two qualifying silences separated by a 0.1s spike merge into one
        // run, producing a single cut instead of two.
        let audio = track(&[
            (0.5, 10.0),
            (0.0, 6.1),
            (0.9, 0.1),
            (0.0, 6.1),
            (0.5, 10.0),
        ]);
        let plan = plan_segments(&audio, &cfg(6.0)).unwrap();

        assert_eq!(plan.silences.len(), 1);
        assert_eq!(plan.segments.len(), 2);
    }

    #[test]
    fn trailing_silence_truncates_final_segment() {
        // Track ends inside a qualifying silence.
        let audio = track(&[(0.5, 10.0), (0.0, 7.0), (0.5, 10.0), (0.0, 8.0)]);
        let plan = plan_segments(&audio, &cfg(6.0)).unwrap();

        assert_eq!(plan.segments.len(), 2);
        // Final segment ends where the trailing silence begins, not at its
        // midpoint and not at track end.
        assert_eq!(plan.segments[1].end_sample, 27_000);
        // Only the interior silence contributes a cut point.
        assert_eq!(plan.cut_samples.len(), 1);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let audio = track(&[(0.5, 2.0)]);
        let bad = SilenceConfig {
            min_silence_secs: 6.0,
            amplitude_threshold: 1.5,
        };
        let err = plan_segments(&audio, &bad).unwrap_err();
        assert!(matches!(
            err,
            SegmentationError::InvalidConfig {
                parameter: "amplitude_threshold",
                ..
            }
        ));
    }

    #[test]
    fn zero_min_silence_is_rejected() {
        let audio = track(&[(0.5, 2.0)]);
        let bad = SilenceConfig {
            min_silence_secs: 0.0,
            amplitude_threshold: 0.01,
        };
        assert!(matches!(
            plan_segments(&audio, &bad),
            Err(SegmentationError::InvalidConfig {
                parameter: "min_silence_secs",
                ..
            })
        ));
    }

    #[test]
    fn all_silence_track_is_a_degenerate_segment() {
        // The single qualifying run spans the whole track and touches
        // end-of-track, so the final bound collapses onto the start.
        let audio = track(&[(0.0, 12.0)]);
        let result = plan_segments(&audio, &cfg(6.0));
        assert!(matches!(
            result,
            Err(SegmentationError::DegenerateSegment { index: 1, .. })
        ));
    }
}
