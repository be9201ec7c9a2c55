//! Snapshot store port
//!
//! Defines the interface for reading and writing the assessment snapshot.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// A snapshot older than this many milliseconds is stale
pub const STALE_AFTER_MS: i64 = 3_600_000;

/// Errors writing a snapshot
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Caller passed something that is not a JSON object
    #[error("invalid snapshot payload: {0}")]
    InvalidPayload(String),

    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of reading the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRead {
    /// No snapshot (or an unreadable one)
    Absent,
    /// Snapshot exists but is too old to trust
    Stale {
        /// Age in whole minutes, when the timestamp could be read
        age_minutes: Option<i64>,
        /// Raw export timestamp
        exported_at: Option<String>,
    },
    /// Fresh, redacted snapshot
    Fresh(Value),
}

/// Store for the assessment snapshot
///
/// Implementations own exactly one snapshot; writes replace it.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot as of `now`
    fn read_at(&self, now: DateTime<Utc>) -> SnapshotRead;

    /// Read the snapshot as of the current time
    fn read(&self) -> SnapshotRead {
        self.read_at(Utc::now())
    }

    /// Stamp and write a payload, returning what was written
    fn write(&self, payload: Value) -> Result<Value, BridgeError>;

    /// Where the snapshot lives, for display
    fn location(&self) -> String;
}
