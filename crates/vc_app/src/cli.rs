//! Command-line interface for video-converter
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default config location, created with defaults when missing.
pub const DEFAULT_CONFIG_PATH: &str = ".config/video-converter.toml";

/// Merge uploaded video chunks and convert them to MPEG-DASH
#[derive(Parser, Debug)]
#[command(
    name = "video-converter",
    version,
    about = "Merge uploaded video chunks and convert them to MPEG-DASH"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Verbose output (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle one JSON task message
    Handle {
        /// Task message, e.g. '{"video_id": 1, "path": "uploads/1"}' (read from stdin when omitted)
        message: Option<String>,
    },

    /// Run a task given on the command line
    Run {
        /// Video identifier
        #[arg(long, value_name = "ID")]
        video_id: i64,

        /// Directory holding the chunks
        #[arg(long, value_name = "DIR")]
        path: PathBuf,
    },

    /// Handle newline-delimited task messages from a file
    Batch {
        /// File with one JSON task message per line
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
