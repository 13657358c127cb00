//! Per-task logger with tracing and optional file output.
//!
//! Each task run gets its own logger that:
//! - Mirrors every message to `tracing`, tagged with the video id
//! - Optionally writes a dedicated log file
//! - Keeps a tail buffer of transcoder output for error diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix};

/// Per-task logger.
pub struct TaskLogger {
    video_id: i64,
    log_path: Option<PathBuf>,
    file_writer: Mutex<Option<BufWriter<File>>>,
    config: LogConfig,
    /// Recent transcoder output lines.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl TaskLogger {
    /// Create a logger that only emits `tracing` events.
    pub fn new(video_id: i64, config: LogConfig) -> Self {
        Self {
            video_id,
            log_path: None,
            file_writer: Mutex::new(None),
            tail_buffer: Mutex::new(VecDeque::with_capacity(config.error_tail)),
            config,
        }
    }

    /// Create a logger that also writes `<log_dir>/task_<video_id>.log`.
    pub fn with_file(
        video_id: i64,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
    ) -> std::io::Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("task_{}.log", video_id));
        let file = File::create(&log_path)?;

        let mut logger = Self::new(video_id, config);
        logger.log_path = Some(log_path);
        logger.file_writer = Mutex::new(Some(BufWriter::new(file)));
        Ok(logger)
    }

    pub fn video_id(&self) -> i64 {
        self.video_id
    }

    /// Path to the log file, if file output is enabled.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        self.emit(level, message);
        self.write_line(message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Command.format(command));
    }

    /// Log a stage marker.
    pub fn phase(&self, phase_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(phase_name));
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Record one line of transcoder output.
    ///
    /// In compact mode the line only lands in the tail buffer.
    pub fn output_line(&self, line: &str) {
        {
            let mut buffer = self.tail_buffer.lock();
            if self.config.error_tail > 0 {
                if buffer.len() >= self.config.error_tail {
                    buffer.pop_front();
                }
                buffer.push_back(line.to_string());
            }
        }

        if !self.config.compact {
            self.log(LogLevel::Debug, line);
        }
    }

    /// Dump the tail buffer (typically after a failure).
    pub fn show_tail(&self, header: &str) {
        let lines = self.get_tail();
        if lines.is_empty() {
            return;
        }

        self.log(LogLevel::Error, &format!("[{}/tail]", header));
        for line in &lines {
            self.log(LogLevel::Error, line);
        }
    }

    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Flush and release the log file.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn emit(&self, level: LogLevel, message: &str) {
        let video_id = self.video_id;
        match level {
            LogLevel::Trace => tracing::trace!(video_id, "{}", message),
            LogLevel::Debug => tracing::debug!(video_id, "{}", message),
            LogLevel::Info => tracing::info!(video_id, "{}", message),
            LogLevel::Warn => tracing::warn!(video_id, "{}", message),
            LogLevel::Error => tracing::error!(video_id, "{}", message),
        }
    }

    fn write_line(&self, message: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = if self.config.show_timestamps {
                writeln!(writer, "[{}] {}", Local::now().format("%H:%M:%S"), message)
            } else {
                writeln!(writer, "{}", message)
            };
        }
    }
}

impl Drop for TaskLogger {
    fn drop(&mut self) {
        self.close();
    }
}
