//! Data models for Video Converter.
//!
//! - Task descriptors decoded from inbound messages
//! - Stage, status, and error-kind enums shared by the pipeline

mod enums;
mod task;

pub use enums::{CleanupFailurePolicy, ErrorKind, TaskStage, TaskStatus};
pub use task::{salvage_video_id, Task, TaskDecodeError};
