//! VC Core - chunk merging and MPEG-DASH conversion for uploaded videos.
//!
//! This crate holds all processing logic: chunk discovery and merging, the
//! transcoder seam, the per-task pipeline, and failure reporting. The
//! `video-converter` binary is a thin CLI over [`orchestrator::TaskHandler`].

pub mod chunks;
pub mod config;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod reporting;
pub mod transcode;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
