//! Discovery of per-slide audio clips and rendered images.
//!
//! Scans rely on the zero-padded `slide_NN.<ext>` contract from
//! [`crate::models`]: files with a slide media extension that break the
//! convention fail the scan, because silently skipping them would reorder
//! or drop slides downstream.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::{parse_slide_filename, SlideId, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS};
use crate::segmentation::get_duration;

use super::types::{AudioRef, DiscoveryError, DiscoveryResult};

/// Scan a directory for `slide_NN` image files.
///
/// A missing directory yields an empty map (missing assets surface per
/// slide during assembly, with the offending id).
pub fn scan_slide_images(dir: &Path) -> DiscoveryResult<BTreeMap<SlideId, PathBuf>> {
    scan_slide_files(dir, IMAGE_EXTENSIONS)
}

/// Scan a directory for `slide_NN` audio files (no duration probing).
pub fn scan_slide_audio_files(dir: &Path) -> DiscoveryResult<BTreeMap<SlideId, PathBuf>> {
    scan_slide_files(dir, AUDIO_EXTENSIONS)
}

/// Probe durations for discovered audio files via ffprobe.
pub fn probe_audio_durations(
    files: &BTreeMap<SlideId, PathBuf>,
) -> DiscoveryResult<BTreeMap<SlideId, AudioRef>> {
    let mut audio = BTreeMap::new();
    for (&slide, path) in files {
        let duration_secs = get_duration(path).map_err(|e| DiscoveryError::Probe {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            "audio slide {}: {} ({:.2}s)",
            slide,
            path.display(),
            duration_secs
        );
        audio.insert(slide, AudioRef::new(path.clone(), duration_secs));
    }
    Ok(audio)
}

fn scan_slide_files(
    dir: &Path,
    extensions: &[&str],
) -> DiscoveryResult<BTreeMap<SlideId, PathBuf>> {
    let mut found: BTreeMap<SlideId, PathBuf> = BTreeMap::new();

    if !dir.exists() {
        tracing::warn!("directory {} does not exist; no slides found", dir.display());
        return Ok(found);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DiscoveryError::Io {
        dir: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::Io {
            dir: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        // Files without a slide media extension (notes, hidden files) are
        // not part of the contract and are ignored.
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if extensions.contains(&ext.to_ascii_lowercase().as_str()) => {}
            _ => continue,
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        let slide = parse_slide_filename(name, extensions).map_err(|e| {
            DiscoveryError::NonConformingName {
                dir: dir.to_path_buf(),
                source: e,
            }
        })?;

        if let Some(first) = found.get(&slide) {
            return Err(DiscoveryError::DuplicateIndex {
                slide,
                first: first.clone(),
                second: path,
            });
        }
        found.insert(slide, path);
    }

    Ok(found)
}
