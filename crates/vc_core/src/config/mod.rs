//! Configuration management for Video Converter.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Defaults for every missing key
//!
//! # Example
//!
//! ```no_run
//! use vc_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/video-converter.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Transcoder: {}", config.settings().transcoder.program);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ChunkSettings, LoggingSettings, PathSettings, PipelineSettings, Settings, TranscoderSettings,
};
