//! File-based snapshot storage
//!
//! Implements `SnapshotStore` using a single JSON handoff file.

mod bridge;

pub use bridge::{BRIDGE_SOURCE, FileSnapshotBridge, redact};
