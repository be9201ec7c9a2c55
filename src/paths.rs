//! Centralized path definitions for cmmc-query
//!
//! This module provides a single source of truth for all filesystem paths.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.cmmc-query/
//! ├── config.toml                    # User configuration
//! ├── data/                          # Default catalog source directory
//! │   └── *.toml
//! └── bridge/
//!     └── assessment-snapshot.json   # Handoff file written by the assessment UI
//! ```

use std::path::PathBuf;

/// Application directory name under the home directory
const APP_DIR: &str = ".cmmc-query";

/// Configuration filename
const CONFIG_FILE: &str = "config.toml";

/// Catalog source subdirectory
const DATA_DIR: &str = "data";

/// Bridge subdirectory
const BRIDGE_DIR: &str = "bridge";

/// Snapshot handoff filename
const SNAPSHOT_FILE: &str = "assessment-snapshot.json";

/// Get the application directory.
///
/// Returns `~/.cmmc-query/`.
#[must_use]
pub fn app_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(APP_DIR)
}

/// Get the configuration file path.
///
/// Returns `~/.cmmc-query/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}

/// Get the default catalog source directory.
///
/// Returns `~/.cmmc-query/data/`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    app_dir().join(DATA_DIR)
}

/// Get the snapshot handoff file path.
///
/// Returns `~/.cmmc-query/bridge/assessment-snapshot.json`. The assessment UI
/// writes this file; only one producer is expected.
#[must_use]
pub fn bridge_file() -> PathBuf {
    app_dir().join(BRIDGE_DIR).join(SNAPSHOT_FILE)
}
