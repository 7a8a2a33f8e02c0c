//! Configuration management.
//!
//! TOML-based configuration with logical sections and atomic file writes
//! (write to temp, then rename).
//!
//! # Example
//!
//! ```no_run
//! use slidecast_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/slidecast.toml");
//! config.load_or_create().unwrap();
//!
//! println!("min silence: {}s", config.settings().segmentation.min_silence_secs);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    AssemblySettings, LoggingSettings, PathSettings, SegmentationSettings, Settings,
};
