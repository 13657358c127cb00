//! Pipeline step implementations.

mod cleanup;
mod merge;
mod prepare_output;
mod transcode;

pub use cleanup::CleanupStep;
pub use merge::MergeStep;
pub use prepare_output::PrepareOutputStep;
pub use transcode::TranscodeStep;
