//! Port traits for external dependencies
//!
//! The only external dependency is the assessment snapshot handoff file.

mod snapshot_store;

pub use snapshot_store::{BridgeError, SnapshotRead, SnapshotStore, STALE_AFTER_MS};
