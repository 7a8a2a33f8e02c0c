//! Timeline assembly: tokens + discovered assets -> ordered clip entries.
//!
//! Two pure functions share the [`TimelineEntry`] output type: token-driven
//! assembly when the script contains slide markers, and fallback ordering
//! (ascending slide id over the discovered asset ids) when it does not.
//!
//! Duration resolution priority: audio duration (authoritative), then the
//! configured pause default, then [`MIN_CLIP_SECS`] as a hard floor so no
//! zero-duration clip reaches the encoder.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{PauseKind, SlideId};
use crate::script::{has_slide_markers, ScriptToken};

use super::types::{AssemblyError, AssemblyResult, AudioRef, TimelineEntry};

/// Hard minimum clip duration fed to the encoder.
pub const MIN_CLIP_SECS: f64 = 0.1;

/// Configured pause lengths in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PauseDurations {
    pub short_secs: f64,
    pub long_secs: f64,
}

impl Default for PauseDurations {
    fn default() -> Self {
        Self {
            short_secs: 0.8,
            long_secs: 1.6,
        }
    }
}

impl PauseDurations {
    /// Seconds for the given pause kind.
    pub fn secs(&self, kind: PauseKind) -> f64 {
        match kind {
            PauseKind::Short => self.short_secs,
            PauseKind::Long => self.long_secs,
        }
    }
}

/// Inputs to one assembly run: an immutable snapshot of parsed tokens and
/// discovered assets.
#[derive(Debug)]
pub struct AssemblyInput<'a> {
    /// Parsed script tokens, if a script was found.
    pub tokens: Option<&'a [ScriptToken]>,
    /// Discovered per-slide audio with probed durations.
    pub audio: &'a BTreeMap<SlideId, AudioRef>,
    /// Discovered per-slide rendered images.
    pub images: &'a BTreeMap<SlideId, PathBuf>,
    /// External vignette clip, if present.
    pub vignette: Option<&'a Path>,
    /// Configured pause lengths.
    pub pauses: PauseDurations,
}

/// Assemble the ordered timeline entry sequence.
///
/// Token-driven mode requires at least one slide marker; otherwise the
/// fallback ordering over discovered slide ids is used.
pub fn assemble(input: AssemblyInput<'_>) -> AssemblyResult<Vec<TimelineEntry>> {
    match input.tokens {
        Some(tokens) if has_slide_markers(tokens) => assemble_from_tokens(tokens, &input),
        _ => {
            tracing::info!("no usable script tokens; using fallback slide ordering");
            assemble_fallback(&input)
        }
    }
}

/// Token-driven assembly: walk the script tokens in reading order.
fn assemble_from_tokens(
    tokens: &[ScriptToken],
    input: &AssemblyInput<'_>,
) -> AssemblyResult<Vec<TimelineEntry>> {
    let mut entries: Vec<TimelineEntry> = Vec::new();
    let mut seen: BTreeSet<SlideId> = BTreeSet::new();
    let mut last_slide: Option<SlideId> = None;
    let mut last_image: Option<PathBuf> = None;
    // Index of the most recent entry still awaiting a pause-derived
    // duration (a slide without audio).
    let mut pending: Option<usize> = None;

    for token in tokens {
        match token {
            ScriptToken::Slide(id) => {
                if !seen.insert(*id) {
                    return Err(AssemblyError::DuplicateSlide { slide: *id });
                }
                if let Some(prev) = last_slide {
                    if *id < prev {
                        tracing::warn!(
                            "slide {} appears after slide {}; keeping script order",
                            id,
                            prev
                        );
                    }
                }

                let image = input.images.get(id).cloned();
                let audio = input.audio.get(id).cloned();
                if image.is_none() && audio.is_none() {
                    return Err(AssemblyError::MissingAsset { slide: *id });
                }

                // A still-pending predecessor is closed with the short
                // default once another slide opens.
                resolve_pending(&mut entries, &mut pending, input.pauses.short_secs);

                let duration = audio.as_ref().map(|a| a.duration_secs);
                if image.is_some() {
                    last_image = image.clone();
                }
                last_slide = Some(*id);
                entries.push(TimelineEntry::slide(*id, image, audio, duration));
                if duration.is_none() {
                    pending = Some(entries.len() - 1);
                }
            }
            ScriptToken::Pause(kind) => {
                let secs = input.pauses.secs(*kind);
                if let Some(idx) = pending.take() {
                    // The open entry has no audio; the pause sizes it.
                    entries[idx].duration_secs = Some(secs);
                    entries[idx].pause = Some(*kind);
                } else if let Some(image) = last_image.clone() {
                    // The open entry's duration is audio-derived; the pause
                    // becomes an extra freeze-frame on the last shown image.
                    entries.push(TimelineEntry::freeze_frame(last_slide, image, *kind, secs));
                } else {
                    tracing::warn!("{} before any slide; skipped", kind);
                }
            }
            ScriptToken::Vignette => match input.vignette {
                Some(clip) => entries.push(TimelineEntry::vignette(clip)),
                None => {
                    tracing::warn!("[vignette] marker but no vignette clip found; skipped");
                }
            },
            // Narration informs the external audio-generation step only.
            ScriptToken::Text(_) => {}
        }
    }

    resolve_pending(&mut entries, &mut pending, input.pauses.short_secs);
    apply_duration_floor(&mut entries);
    Ok(entries)
}

/// Fallback assembly: ascending slide id over the union of discovered
/// audio and image ids. No pauses or vignettes are synthesized.
fn assemble_fallback(input: &AssemblyInput<'_>) -> AssemblyResult<Vec<TimelineEntry>> {
    let ids: BTreeSet<SlideId> = input
        .audio
        .keys()
        .chain(input.images.keys())
        .copied()
        .collect();

    if ids.is_empty() {
        return Err(AssemblyError::NoSlides);
    }

    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let image = input.images.get(&id).cloned();
        let audio = input.audio.get(&id).cloned();
        let duration = audio
            .as_ref()
            .map(|a| a.duration_secs)
            .unwrap_or(input.pauses.short_secs);
        entries.push(TimelineEntry::slide(id, image, audio, Some(duration)));
    }

    apply_duration_floor(&mut entries);
    Ok(entries)
}

/// Close a pending audio-less entry with the short-pause default.
fn resolve_pending(
    entries: &mut [TimelineEntry],
    pending: &mut Option<usize>,
    short_secs: f64,
) {
    if let Some(idx) = pending.take() {
        entries[idx].duration_secs = Some(short_secs);
    }
}

/// Enforce the hard minimum duration on every resolved entry.
fn apply_duration_floor(entries: &mut [TimelineEntry]) {
    for entry in entries {
        if let Some(d) = entry.duration_secs {
            entry.duration_secs = Some(d.max(MIN_CLIP_SECS));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;
    use crate::timeline::types::EntryKind;

    fn audio_map(entries: &[(u32, f64)]) -> BTreeMap<SlideId, AudioRef> {
        entries
            .iter()
            .map(|&(n, d)| {
                (
                    SlideId::new(n),
                    AudioRef::new(format!("audios/slide_{:02}.wav", n), d),
                )
            })
            .collect()
    }

    fn image_map(ids: &[u32]) -> BTreeMap<SlideId, PathBuf> {
        ids.iter()
            .map(|&n| (SlideId::new(n), PathBuf::from(format!("frames/slide_{:02}.png", n))))
            .collect()
    }

    fn input<'a>(
        tokens: Option<&'a [ScriptToken]>,
        audio: &'a BTreeMap<SlideId, AudioRef>,
        images: &'a BTreeMap<SlideId, PathBuf>,
        vignette: Option<&'a Path>,
    ) -> AssemblyInput<'a> {
        AssemblyInput {
            tokens,
            audio,
            images,
            vignette,
            pauses: PauseDurations {
                short_secs: 0.8,
                long_secs: 2.0,
            },
        }
    }

    #[test]
    fn full_coverage_binds_audio_durations() {
        let tokens = script::parse("[slide_01][slide_02][slide_03]");
        let audio = audio_map(&[(1, 4.0), (2, 5.5), (3, 3.25)]);
        let images = image_map(&[1, 2, 3]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();

        assert_eq!(entries.len(), 3);
        for (entry, dur) in entries.iter().zip([4.0, 5.5, 3.25]) {
            assert_eq!(entry.kind, EntryKind::Slide);
            assert_eq!(entry.duration_secs, Some(dur));
            assert!(entry.audio.is_some());
            assert!(entry.image.is_some());
        }
    }

    #[test]
    fn spec_scenario_pause_and_trailing_audio_less_slide() {
        // "[slide_01] [long_pause] Intro [slide_02] [short_pause]"
        // audio only for slide_01 (3.0s), images for both, long=2.0s.
        let tokens = script::parse("[slide_01] [long_pause] Intro [slide_02] [short_pause]");
        let audio = audio_map(&[(1, 3.0)]);
        let images = image_map(&[1, 2]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();

        assert_eq!(entries.len(), 3);

        // slide_01: image + audio, duration from audio.
        assert_eq!(entries[0].kind, EntryKind::Slide);
        assert_eq!(entries[0].slide_id, Some(SlideId::new(1)));
        assert_eq!(entries[0].duration_secs, Some(3.0));

        // long pause after an audio-backed slide: freeze-frame on slide_01.
        assert_eq!(entries[1].kind, EntryKind::FreezeFrame);
        assert_eq!(entries[1].slide_id, Some(SlideId::new(1)));
        assert_eq!(entries[1].image, entries[0].image);
        assert_eq!(entries[1].duration_secs, Some(2.0));
        assert_eq!(entries[1].pause, Some(PauseKind::Long));

        // slide_02 has no audio; the trailing short pause sizes it.
        assert_eq!(entries[2].kind, EntryKind::Slide);
        assert_eq!(entries[2].slide_id, Some(SlideId::new(2)));
        assert!(entries[2].audio.is_none());
        assert_eq!(entries[2].duration_secs, Some(0.8));
    }

    #[test]
    fn pause_after_audio_slide_spawns_freeze_frame() {
        let tokens = script::parse("[slide_01][short_pause]");
        let audio = audio_map(&[(1, 2.5)]);
        let images = image_map(&[1]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].duration_secs, Some(2.5));
        assert_eq!(entries[1].kind, EntryKind::FreezeFrame);
        assert_eq!(entries[1].duration_secs, Some(0.8));
    }

    #[test]
    fn audio_less_slide_without_pause_gets_short_default() {
        let tokens = script::parse("[slide_01]");
        let audio = BTreeMap::new();
        let images = image_map(&[1]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].duration_secs, Some(0.8));
    }

    #[test]
    fn missing_asset_is_fatal_and_names_the_slide() {
        let tokens = script::parse("[slide_01][slide_03]");
        let audio = audio_map(&[(1, 3.0)]);
        let images = image_map(&[1]);

        let err = assemble(input(Some(&tokens), &audio, &images, None)).unwrap_err();
        match err {
            AssemblyError::MissingAsset { slide } => assert_eq!(slide.to_string(), "03"),
            other => panic!("expected MissingAsset, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_primary_slide_is_fatal() {
        let tokens = script::parse("[slide_01][slide_02][slide_01]");
        let audio = audio_map(&[(1, 3.0), (2, 3.0)]);
        let images = image_map(&[1, 2]);

        let err = assemble(input(Some(&tokens), &audio, &images, None)).unwrap_err();
        assert!(matches!(err, AssemblyError::DuplicateSlide { .. }));
    }

    #[test]
    fn vignette_inserts_entry_when_clip_present() {
        let tokens = script::parse("[vignette][slide_01]");
        let audio = audio_map(&[(1, 3.0)]);
        let images = image_map(&[1]);
        let clip = PathBuf::from("vignette.mp4");

        let entries =
            assemble(input(Some(&tokens), &audio, &images, Some(&clip))).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_vignette());
        assert_eq!(entries[0].clip.as_deref(), Some(Path::new("vignette.mp4")));
        assert_eq!(entries[0].duration_secs, None);
    }

    #[test]
    fn vignette_without_clip_is_skipped_not_fatal() {
        let tokens = script::parse("[vignette][slide_01]");
        let audio = audio_map(&[(1, 3.0)]);
        let images = image_map(&[1]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Slide);
    }

    #[test]
    fn pause_before_any_slide_is_skipped() {
        let tokens = script::parse("[short_pause][slide_01]");
        let audio = audio_map(&[(1, 3.0)]);
        let images = image_map(&[1]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn fallback_orders_by_ascending_id() {
        let audio = audio_map(&[(2, 2.0), (1, 1.0), (3, 3.0)]);
        let images = image_map(&[1, 2, 3]);

        let entries = assemble(input(None, &audio, &images, None)).unwrap();

        assert_eq!(entries.len(), 3);
        let ids: Vec<u32> = entries
            .iter()
            .map(|e| e.slide_id.unwrap().number())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let durs: Vec<f64> = entries.iter().map(|e| e.duration_secs.unwrap()).collect();
        assert_eq!(durs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn script_without_slide_markers_falls_back() {
        let tokens = script::parse("Only narration here. [short_pause]");
        let audio = audio_map(&[(1, 1.5)]);
        let images = image_map(&[1]);

        let entries = assemble(input(Some(&tokens), &audio, &images, None)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Slide);
    }

    #[test]
    fn fallback_with_no_assets_is_an_error() {
        let audio = BTreeMap::new();
        let images = BTreeMap::new();
        let err = assemble(input(None, &audio, &images, None)).unwrap_err();
        assert!(matches!(err, AssemblyError::NoSlides));
    }

    #[test]
    fn duration_floor_prevents_zero_length_clips() {
        let audio = BTreeMap::new();
        let images = image_map(&[1]);
        let tokens = script::parse("[slide_01]");

        let mut inp = input(Some(&tokens), &audio, &images, None);
        inp.pauses.short_secs = 0.0;

        let entries = assemble(inp).unwrap();
        assert_eq!(entries[0].duration_secs, Some(MIN_CLIP_SECS));
    }
}
