//! Logging infrastructure for Video Converter.
//!
//! This module provides:
//! - Per-task loggers mirrored to `tracing`, with optional log files
//! - Tail buffer of transcoder output for error diagnosis
//! - Global `tracing` subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use vc_core::logging::{TaskLogger, LogConfig};
//!
//! let logger = TaskLogger::with_file(1, ".logs", LogConfig::default()).unwrap();
//! logger.phase("Merging");
//! logger.command("ffmpeg -i merged.mp4 ...");
//! logger.success("Task completed");
//! ```

mod task_logger;
mod types;

pub use task_logger::TaskLogger;
pub use types::{LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG`, falling back to `default_level`. Should be called
/// once at startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

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
        assert_eq!(level_to_filter_str(LogLevel::Error), "error");
    }
}
