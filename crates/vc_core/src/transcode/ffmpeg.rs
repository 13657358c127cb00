//! FFmpeg-backed DASH transcoder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::errors::{TranscodeError, TranscodeResult};
use super::{TranscodeOutput, Transcoder};
use crate::config::TranscoderSettings;

/// Runs ffmpeg with a fixed codec and container selection.
///
/// Equivalent command line:
///
/// ```text
/// ffmpeg -y -i <input> -c:v libx264 -c:a aac -f dash <output_dir>/output.mpd
/// ```
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    /// Executable name or path (looked up on PATH when bare).
    program: PathBuf,
    video_codec: String,
    audio_codec: String,
    format: String,
    manifest_name: String,
    overwrite: bool,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self::from_settings(&TranscoderSettings::default())
    }

    /// Build a transcoder from the `[transcoder]` config section.
    pub fn from_settings(settings: &TranscoderSettings) -> Self {
        Self {
            program: PathBuf::from(&settings.program),
            video_codec: settings.video_codec.clone(),
            audio_codec: settings.audio_codec.clone(),
            format: settings.format.clone(),
            manifest_name: settings.manifest_name.clone(),
            overwrite: settings.overwrite,
        }
    }

    /// Use a custom executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Manifest path inside `output_dir`.
    pub fn manifest_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.manifest_name)
    }

    /// Argument vector passed to the executable.
    pub fn args(&self, input: &Path, output_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(10);
        if self.overwrite {
            args.push("-y".into());
        }
        args.push("-i".into());
        args.push(input.as_os_str().to_owned());
        args.push("-c:v".into());
        args.push(self.video_codec.clone().into());
        args.push("-c:a".into());
        args.push(self.audio_codec.clone().into());
        args.push("-f".into());
        args.push(self.format.clone().into());
        args.push(self.manifest_path(output_dir).into_os_string());
        args
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn describe(&self, input: &Path, output_dir: &Path) -> String {
        let rendered: Vec<_> = self
            .args(input, output_dir)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        format!("{} {}", self.program_name(), rendered.join(" "))
    }

    fn transcode(&self, input: &Path, output_dir: &Path) -> TranscodeResult<TranscodeOutput> {
        let args = self.args(input, output_dir);

        tracing::debug!("Running transcoder: {}", self.describe(input, output_dir));

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| TranscodeError::Spawn {
                program: self.program_name(),
                source: e,
            })?;

        let mut diagnostics = String::from_utf8_lossy(&result.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&result.stderr));

        if !result.status.success() {
            return Err(TranscodeError::Failed {
                program: self.program_name(),
                exit_code: result.status.code().unwrap_or(-1),
                diagnostics,
            });
        }

        Ok(TranscodeOutput {
            manifest: self.manifest_path(output_dir),
            diagnostics,
        })
    }
}
