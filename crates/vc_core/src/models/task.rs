//! Task descriptor decoded from inbound messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A request to reassemble and transcode one uploaded video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier of the video in the upstream system.
    pub video_id: i64,
    /// Directory holding the uploaded chunks.
    pub path: PathBuf,
}

impl Task {
    pub fn new(video_id: i64, path: impl Into<PathBuf>) -> Self {
        Self {
            video_id,
            path: path.into(),
        }
    }

    /// Decode a JSON task message.
    ///
    /// Both fields are required and `path` must not be empty.
    pub fn from_json(message: &[u8]) -> Result<Self, TaskDecodeError> {
        let task: Task = serde_json::from_slice(message)?;
        task.validate()?;
        Ok(task)
    }

    /// Check the fields a decoded message must satisfy.
    pub fn validate(&self) -> Result<(), TaskDecodeError> {
        if self.path.as_os_str().is_empty() {
            return Err(TaskDecodeError::EmptyPath);
        }
        Ok(())
    }
}

/// Reasons a task message cannot be decoded.
#[derive(thiserror::Error, Debug)]
pub enum TaskDecodeError {
    #[error("invalid task message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task path must not be empty")]
    EmptyPath,
}

/// Best-effort recovery of `video_id` from a message that failed to decode.
///
/// Returns 0 when the message is not a JSON object with an integer
/// `video_id`.
pub fn salvage_video_id(message: &[u8]) -> i64 {
    serde_json::from_slice::<serde_json::Value>(message)
        .ok()
        .and_then(|v| v.get("video_id").and_then(|id| id.as_i64()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_task_message() {
        let task = Task::from_json(br#"{"video_id": 1, "path": "uploads/1"}"#).unwrap();
        assert_eq!(task.video_id, 1);
        assert_eq!(task.path, PathBuf::from("uploads/1"));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(Task::from_json(br#"{"video_id": 1}"#).is_err());
        assert!(Task::from_json(br#"{"path": "uploads/1"}"#).is_err());
    }

    #[test]
    fn rejects_empty_path() {
        let err = Task::from_json(br#"{"video_id": 3, "path": ""}"#).unwrap_err();
        assert!(matches!(err, TaskDecodeError::EmptyPath));
    }

    #[test]
    fn validate_rejects_constructed_empty_path() {
        assert!(matches!(
            Task::new(3, "").validate(),
            Err(TaskDecodeError::EmptyPath)
        ));
        assert!(Task::new(3, "uploads/3").validate().is_ok());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Task::from_json(br#"{"video_id": "one", "path": "x"}"#).is_err());
        assert!(Task::from_json(b"not json").is_err());
    }

    #[test]
    fn salvages_id_when_possible() {
        assert_eq!(salvage_video_id(br#"{"video_id": 7, "path": 12}"#), 7);
        assert_eq!(salvage_video_id(br#"{"video_id": 7, "path": ""}"#), 7);
        assert_eq!(salvage_video_id(b"{broken"), 0);
        assert_eq!(salvage_video_id(br#"{"video_id": "x"}"#), 0);
    }
}
