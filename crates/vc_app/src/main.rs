//! Video Converter command-line entry point.
//!
//! Usage:
//!   video-converter handle '{"video_id": 1, "path": "uploads/1"}'
//!   video-converter run --video-id 1 --path uploads/1
//!   video-converter batch tasks.jsonl

mod cli;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use vc_core::config::{ConfigManager, Settings};
use vc_core::logging::init_tracing;
use vc_core::models::Task;
use vc_core::orchestrator::{TaskError, TaskHandler, TaskOutcome};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli.config)?;
    let mut level = settings.logging.level;
    for _ in 0..cli.verbose {
        level = level.more_verbose();
    }
    init_tracing(level);
    tracing::debug!("video-converter {} starting", vc_core::version());

    let handler = TaskHandler::new(settings);

    let results = match cli.command {
        Commands::Handle { message } => {
            let message = match message {
                Some(message) => message,
                None => read_stdin()?,
            };
            vec![handler.handle(message.trim().as_bytes())]
        }
        Commands::Run { video_id, path } => vec![handler.run(&Task::new(video_id, path))],
        Commands::Batch { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read batch file {}", file.display()))?;
            handler.handle_batch(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty()),
            )
        }
    };

    report_results(&results)
}

fn load_settings(path: &Path) -> Result<Settings> {
    let mut manager = ConfigManager::new(path);
    manager
        .load_or_create()
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    manager
        .ensure_dirs_exist()
        .context("Failed to create configured directories")?;
    Ok(manager.into_settings())
}

fn read_stdin() -> Result<String> {
    let mut message = String::new();
    io::stdin()
        .read_to_string(&mut message)
        .context("Failed to read task message from stdin")?;
    Ok(message)
}

/// Print each outcome as a JSON line; fail when any task failed.
fn report_results(results: &[Result<TaskOutcome, TaskError>]) -> Result<()> {
    let mut failed = 0;
    for result in results {
        match result {
            Ok(outcome) => println!("{}", serde_json::to_string(outcome)?),
            Err(e) => {
                failed += 1;
                eprintln!("video {}: {}", e.video_id(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} task(s) failed", failed, results.len());
    }
    Ok(())
}
