//! Config manager for loading and saving settings.
//!
//! Writes are atomic (temp file, then rename) so a crash never leaves a
//! half-written config behind.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use super::settings::Settings;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the config file path and the settings loaded from it.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Create a manager for `config_path` holding default settings.
    ///
    /// Nothing is read until `load()` or `load_or_create()` is called.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Changes stay in memory until `save()`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the manager, keeping the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file. Fails if the file does not exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, writing defaults first if it is missing.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            return self.load();
        }

        tracing::info!(
            "Config not found, writing defaults to {}",
            self.config_path.display()
        );
        self.settings = Settings::default();
        self.save()
    }

    /// Create the logs folder when per-task log files are enabled.
    pub fn ensure_dirs_exist(&self) -> ConfigResult<()> {
        if self.settings.logging.task_logs {
            fs::create_dir_all(self.logs_folder())?;
        }
        Ok(())
    }

    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Render the config with a comment above every section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let sections: [(&str, &str, String); 5] = [
            (
                "Log file locations",
                "paths",
                toml::to_string_pretty(&self.settings.paths)?,
            ),
            (
                "Task logging",
                "logging",
                toml::to_string_pretty(&self.settings.logging)?,
            ),
            (
                "Chunk naming and merged artifact layout",
                "chunks",
                toml::to_string_pretty(&self.settings.chunks)?,
            ),
            (
                "External transcoder invocation",
                "transcoder",
                toml::to_string_pretty(&self.settings.transcoder)?,
            ),
            (
                "Failure policies (cleanup_failure: \"warn\" or \"fail\")",
                "pipeline",
                toml::to_string_pretty(&self.settings.pipeline)?,
            ),
        ];

        let mut output = String::new();
        output.push_str("# Video Converter Configuration\n");
        output.push_str("# This file is auto-generated; missing keys fall back to defaults.\n");

        for (comment, table, body) in sections {
            output.push('\n');
            output.push_str(&format!("# {}\n", comment));
            output.push_str(&format!("[{}]\n", table));
            for line in body.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Same directory as the target, so the rename stays atomic.
        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}
