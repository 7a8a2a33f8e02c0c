//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field carries a serde default so partial config files load
//! cleanly.

use serde::{Deserialize, Serialize};

use crate::render::EncodeSettings;
use crate::segmentation::{SilenceConfig, DEFAULT_DETECTION_SAMPLE_RATE};
use crate::timeline::PauseDurations;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Silence-based audio segmentation settings.
    #[serde(default)]
    pub segmentation: SegmentationSettings,

    /// Timeline assembly settings.
    #[serde(default)]
    pub assembly: AssemblySettings,

    /// Output encode settings.
    #[serde(default)]
    pub encode: EncodeSettings,
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Output subdirectory inside a lesson directory.
    #[serde(default = "default_output_subdir")]
    pub output_subdir: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

fn default_output_subdir() -> String {
    "output".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            output_subdir: default_output_subdir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to a per-run file under the logs folder.
    #[serde(default)]
    pub file_logging: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_logging: false,
        }
    }
}

/// Silence detection and segment export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationSettings {
    /// Minimum run of silence that counts as a slide boundary, seconds.
    #[serde(default = "default_min_silence_secs")]
    pub min_silence_secs: f64,

    /// Absolute amplitude at or below which a sample is silent.
    #[serde(default = "default_amplitude_threshold")]
    pub amplitude_threshold: f64,

    /// Sample rate used for the detection decode pass.
    #[serde(default = "default_detection_sample_rate")]
    pub detection_sample_rate: u32,
}

fn default_min_silence_secs() -> f64 {
    5.5
}

fn default_amplitude_threshold() -> f64 {
    0.01
}

fn default_detection_sample_rate() -> u32 {
    DEFAULT_DETECTION_SAMPLE_RATE
}

impl Default for SegmentationSettings {
    fn default() -> Self {
        Self {
            min_silence_secs: default_min_silence_secs(),
            amplitude_threshold: default_amplitude_threshold(),
            detection_sample_rate: default_detection_sample_rate(),
        }
    }
}

impl SegmentationSettings {
    /// The silence detection config derived from these settings.
    pub fn silence_config(&self) -> SilenceConfig {
        SilenceConfig {
            min_silence_secs: self.min_silence_secs,
            amplitude_threshold: self.amplitude_threshold,
        }
    }
}

/// Timeline assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblySettings {
    /// Duration of a `[short_pause]`, seconds.
    #[serde(default = "default_short_pause_secs")]
    pub short_pause_secs: f64,

    /// Duration of a `[long_pause]`, seconds.
    #[serde(default = "default_long_pause_secs")]
    pub long_pause_secs: f64,
}

fn default_short_pause_secs() -> f64 {
    0.8
}

fn default_long_pause_secs() -> f64 {
    1.6
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            short_pause_secs: default_short_pause_secs(),
            long_pause_secs: default_long_pause_secs(),
        }
    }
}

impl AssemblySettings {
    /// The pause duration table derived from these settings.
    pub fn pause_durations(&self) -> PauseDurations {
        PauseDurations {
            short_secs: self.short_pause_secs,
            long_secs: self.long_pause_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.segmentation.min_silence_secs, 5.5);
        assert_eq!(settings.segmentation.amplitude_threshold, 0.01);
        assert_eq!(settings.segmentation.detection_sample_rate, 16000);
        assert_eq!(settings.assembly.short_pause_secs, 0.8);
        assert_eq!(settings.assembly.long_pause_secs, 1.6);
        assert_eq!(settings.encode.crf, 16);
        assert_eq!(settings.encode.preset, "slow");
    }

    #[test]
    fn partial_toml_fills_missing_fields_with_defaults() {
        let toml_str = r#"
            [segmentation]
            min_silence_secs = 3.0

            [encode]
            crf = 20
        "#;
        let settings: Settings = toml::from_str(toml_str).unwrap();

        assert_eq!(settings.segmentation.min_silence_secs, 3.0);
        assert_eq!(settings.segmentation.amplitude_threshold, 0.01);
        assert_eq!(settings.encode.crf, 20);
        assert_eq!(settings.encode.width, 1920);
        assert_eq!(settings.assembly.short_pause_secs, 0.8);
    }

    #[test]
    fn round_trips_through_toml() {
        let settings = Settings::default();
        let serialized = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.encode.preset, settings.encode.preset);
        assert_eq!(
            parsed.segmentation.min_silence_secs,
            settings.segmentation.min_silence_secs
        );
    }
}
