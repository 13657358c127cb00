//! Structured failure reporting.
//!
//! Every pipeline failure is surfaced exactly once through an
//! [`ErrorReporter`]. The reporter is handed to the pipeline explicitly, so
//! tests can capture records with [`RecordingReporter`].

use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::models::ErrorKind;

/// One failure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Task the failure belongs to (0 when it could not be decoded).
    pub video_id: i64,
    /// Stage message, e.g. `failed to merge chunks`.
    pub error: String,
    /// Error detail.
    pub details: String,
    /// Failure taxonomy.
    pub kind: ErrorKind,
    /// RFC 3339 timestamp.
    pub time: String,
}

impl ErrorRecord {
    pub fn new(
        video_id: i64,
        stage_message: impl Into<String>,
        details: impl Into<String>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            video_id,
            error: stage_message.into(),
            details: details.into(),
            kind,
            time: Local::now().to_rfc3339(),
        }
    }
}

/// Sink for failure records.
///
/// Implementations must not panic and must not fail: reporting is the last
/// thing that happens on an error path.
pub trait ErrorReporter: Send + Sync {
    /// Deliver a record.
    fn emit(&self, record: ErrorRecord);

    /// Build a record and deliver it.
    fn report(&self, video_id: i64, stage_message: &str, details: &str, kind: ErrorKind) {
        self.emit(ErrorRecord::new(video_id, stage_message, details, kind));
    }
}

/// Emits each record as a JSON payload on a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn emit(&self, record: ErrorRecord) {
        match serde_json::to_string(&record) {
            Ok(json) => tracing::error!(error_details = %json, "Processing error"),
            Err(e) => tracing::error!(
                video_id = record.video_id,
                error = %record.error,
                details = %record.details,
                serialize_error = %e,
                "Processing error"
            ),
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    records: Arc<Mutex<Vec<ErrorRecord>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records emitted so far.
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ErrorReporter for RecordingReporter {
    fn emit(&self, record: ErrorRecord) {
        self.records.lock().push(record);
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn emit(&self, _record: ErrorRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_expected_fields() {
        let record = ErrorRecord::new(
            3,
            "failed to merge chunks",
            "No sequence number in chunk filename: intro.chunk",
            ErrorKind::SequenceParse,
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["video_id"], 3);
        assert_eq!(json["error"], "failed to merge chunks");
        assert_eq!(json["kind"], "SequenceParseError");
        assert!(json["time"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn recording_reporter_captures_records() {
        let reporter = RecordingReporter::new();
        let shared = reporter.clone();

        shared.report(1, "failed to create mpeg-dash directory", "denied", ErrorKind::Directory);

        assert_eq!(reporter.len(), 1);
        let record = &reporter.records()[0];
        assert_eq!(record.video_id, 1);
        assert_eq!(record.kind, ErrorKind::Directory);
    }

    #[test]
    fn tracing_and_null_reporters_never_panic() {
        crate::logging::init_test_tracing();
        TracingReporter.report(0, "Error unmarshalling task", "bad json", ErrorKind::Parse);
        NullReporter.report(0, "Error unmarshalling task", "bad json", ErrorKind::Parse);
    }
}
