//! Logging infrastructure built on the `tracing` ecosystem.
//!
//! One global subscriber, initialized once at startup: stderr output that
//! respects `RUST_LOG`, plus an optional per-run log file under the
//! configured logs folder.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a config-file level string, defaulting to Info.
    pub fn from_config_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to the provided default level. When
/// `logs_folder` is given, a timestamped log file is also written there;
/// the returned guard must be held for the process lifetime or buffered
/// lines are lost.
///
/// Should be called once at application startup.
pub fn init_tracing(
    default_level: LogLevel,
    logs_folder: Option<&Path>,
) -> std::io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    match logs_folder {
        Some(folder) => {
            std::fs::create_dir_all(folder)?;
            let filename = format!(
                "slidecast_{}.log",
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            );
            let appender = tracing_appender::rolling::never(folder, filename);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(filter)
                .init();
            Ok(None)
        }
    }
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }

    #[test]
    fn config_strings_parse_with_info_fallback() {
        assert_eq!(LogLevel::from_config_str("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_config_str("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_config_str("bogus"), LogLevel::Info);
    }
}
