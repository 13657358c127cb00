//! Settings struct with TOML-based sections.
//!
//! Every field has a default, so a partial (or empty) file is valid.

use serde::{Deserialize, Serialize};

use crate::chunks::{MergeStrategy, DEFAULT_CHUNK_SUFFIX};
use crate::logging::LogLevel;
use crate::models::CleanupFailurePolicy;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Chunk layout inside task directories.
    #[serde(default)]
    pub chunks: ChunkSettings,

    /// External transcoder invocation.
    #[serde(default)]
    pub transcoder: TranscoderSettings,

    /// Pipeline failure policies.
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Path configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for per-task log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for task logs.
    #[serde(default)]
    pub level: LogLevel,

    /// Keep transcoder output in the tail buffer only.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of transcoder output lines shown on failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Prefix task log lines with a timestamp.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Write a log file per task under `paths.logs_folder`.
    #[serde(default)]
    pub task_logs: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
            task_logs: false,
        }
    }
}

/// Chunk naming and merged artifact layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSettings {
    /// Filename suffix identifying chunk files.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Name of the merged artifact inside the task directory.
    #[serde(default = "default_merged_name")]
    pub merged_name: String,

    /// Name of the streaming output directory inside the task directory.
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// How the merged artifact is written.
    #[serde(default)]
    pub merge_strategy: MergeStrategy,
}

fn default_suffix() -> String {
    DEFAULT_CHUNK_SUFFIX.to_string()
}

fn default_merged_name() -> String {
    "merged.mp4".to_string()
}

fn default_output_dir_name() -> String {
    "mpegdash".to_string()
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            merged_name: default_merged_name(),
            output_dir_name: default_output_dir_name(),
            merge_strategy: MergeStrategy::default(),
        }
    }
}

/// Transcoder invocation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscoderSettings {
    /// Executable name (resolved on PATH) or absolute path.
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Output container format.
    #[serde(default = "default_format")]
    pub format: String,

    /// Manifest filename inside the output directory.
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// Overwrite existing output without prompting.
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

fn default_program() -> String {
    "ffmpeg".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_format() -> String {
    "dash".to_string()
}

fn default_manifest_name() -> String {
    "output.mpd".to_string()
}

impl Default for TranscoderSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            format: default_format(),
            manifest_name: default_manifest_name(),
            overwrite: true,
        }
    }
}

/// Pipeline policies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Outcome of a task whose merged artifact cannot be deleted.
    #[serde(default)]
    pub cleanup_failure: CleanupFailurePolicy,
}
