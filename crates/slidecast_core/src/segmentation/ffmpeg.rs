//! FFmpeg waveform source and segment export.
//!
//! Decodes a narration track to mono f64 samples for silence detection,
//! probes durations with ffprobe, and exports planned segments by
//! re-invoking FFmpeg with `-ss`/`-t` on the source file.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use super::types::{AudioData, SegmentationError, SegmentationResult};

/// Default sample rate for silence detection. Detection does not need full
/// fidelity; 16kHz keeps the scan fast while staying well above the
/// temporal resolution the cut points need.
pub const DEFAULT_DETECTION_SAMPLE_RATE: u32 = 16000;

/// Decode an audio file to mono f64 samples at the given sample rate.
///
/// The audio is downmixed to mono, resampled, and read as raw little-endian
/// f64 PCM from FFmpeg's stdout. Decode failures are fatal and happen
/// before any segmentation output is produced.
pub fn decode_audio(input_path: &Path, sample_rate: u32) -> SegmentationResult<AudioData> {
    if !input_path.exists() {
        return Err(SegmentationError::SourceNotFound(
            input_path.display().to_string(),
        ));
    }

    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-i")
        .arg(input_path)
        .arg("-vn") // No video
        .arg("-ac")
        .arg("1") // Mono
        .arg("-ar")
        .arg(sample_rate.to_string())
        .arg("-f")
        .arg("f64le") // 64-bit float, little endian
        .arg("-acodec")
        .arg("pcm_f64le")
        .arg("pipe:1"); // Output to stdout

    cmd.stderr(Stdio::null()).stdout(Stdio::piped());

    tracing::debug!("Running FFmpeg: {:?}", cmd);

    let mut child = cmd
        .spawn()
        .map_err(|e| SegmentationError::Decode(format!("Failed to spawn FFmpeg: {}", e)))?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| SegmentationError::Decode("Failed to capture FFmpeg stdout".to_string()))?;

    let mut buffer = Vec::new();
    stdout
        .read_to_end(&mut buffer)
        .map_err(|e| SegmentationError::Decode(format!("Failed to read FFmpeg output: {}", e)))?;

    let status = child
        .wait()
        .map_err(|e| SegmentationError::Decode(format!("FFmpeg process error: {}", e)))?;

    if !status.success() {
        return Err(SegmentationError::Decode(format!(
            "FFmpeg exited with code: {:?}",
            status.code()
        )));
    }

    let samples = bytes_to_f64_samples(&buffer);

    if samples.is_empty() {
        return Err(SegmentationError::Decode(
            "No audio samples decoded".to_string(),
        ));
    }

    tracing::debug!(
        "Decoded {} samples ({:.2}s) from {}",
        samples.len(),
        samples.len() as f64 / sample_rate as f64,
        input_path.display()
    );

    Ok(AudioData::new(samples, sample_rate))
}

/// Get the duration of a media file in seconds using ffprobe.
pub fn get_duration(input_path: &Path) -> SegmentationResult<f64> {
    if !input_path.exists() {
        return Err(SegmentationError::SourceNotFound(
            input_path.display().to_string(),
        ));
    }

    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(input_path)
        .output()
        .map_err(|e| SegmentationError::Decode(format!("Failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        return Err(SegmentationError::Decode(
            "ffprobe failed to get duration".to_string(),
        ));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    duration_str
        .trim()
        .parse::<f64>()
        .map_err(|e| SegmentationError::Decode(format!("Failed to parse duration: {}", e)))
}

/// Export one segment of the source file as an independently decodable WAV.
///
/// Seeks into the original (not the decoded detection samples) so the
/// exported clip keeps the source's full fidelity.
pub fn export_segment(
    src_path: &Path,
    out_path: &Path,
    index: usize,
    start_secs: f64,
    duration_secs: f64,
) -> SegmentationResult<()> {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-ss")
        .arg(format!("{:.3}", start_secs))
        .arg("-i")
        .arg(src_path)
        .arg("-t")
        .arg(format!("{:.3}", duration_secs))
        .arg("-vn")
        .arg("-acodec")
        .arg("pcm_s16le")
        .arg("-y")
        .arg(out_path);

    cmd.stdout(Stdio::null()).stderr(Stdio::null());

    tracing::debug!("Running FFmpeg (export): {:?}", cmd);

    let status = cmd.status().map_err(|e| SegmentationError::Export {
        index,
        message: format!("Failed to spawn FFmpeg: {}", e),
    })?;

    if !status.success() {
        return Err(SegmentationError::Export {
            index,
            message: format!("FFmpeg exited with code: {:?}", status.code()),
        });
    }

    Ok(())
}

/// Convert raw bytes to f64 samples (little-endian).
fn bytes_to_f64_samples(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(8)
        .map(|chunk| {
            let arr: [u8; 8] = chunk.try_into().unwrap();
            f64::from_le_bytes(arr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_samples_converts_correctly() {
        let val1: f64 = 0.5;
        let val2: f64 = -0.25;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&val1.to_le_bytes());
        bytes.extend_from_slice(&val2.to_le_bytes());

        let samples = bytes_to_f64_samples(&bytes);

        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 0.5).abs() < 1e-10);
        assert!((samples[1] - (-0.25)).abs() < 1e-10);
    }

    #[test]
    fn bytes_to_samples_handles_partial() {
        // Only 10 bytes - one full sample, remainder ignored
        let bytes = vec![0u8; 10];
        let samples = bytes_to_f64_samples(&bytes);
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn decode_rejects_missing_file() {
        let result = decode_audio(Path::new("/nonexistent/narration.wav"), 16000);
        assert!(matches!(result, Err(SegmentationError::SourceNotFound(_))));
    }

    #[test]
    fn duration_rejects_missing_file() {
        let result = get_duration(Path::new("/nonexistent/narration.wav"));
        assert!(matches!(result, Err(SegmentationError::SourceNotFound(_))));
    }
}
