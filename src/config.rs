//! Configuration management
//!
//! Config is stored at `~/.cmmc-query/config.toml`. Every field is optional;
//! a missing or unreadable file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::toml::discover_sources;
use crate::paths;

/// cmmc-query configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for catalog sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Explicit source files, loaded in this order (relative to `data_dir`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<PathBuf>,

    /// Snapshot handoff file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_path: Option<PathBuf>,
}

impl Config {
    /// Load config from the default location
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&paths::config_file())
    }

    /// Load config from a path, or defaults if absent or invalid
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map(|content| toml::from_str(&content)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                log::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Save config to a path
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Directory holding catalog sources
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::default_data_dir)
    }

    /// Snapshot handoff file
    #[must_use]
    pub fn bridge_path(&self) -> PathBuf {
        self.bridge_path.clone().unwrap_or_else(paths::bridge_file)
    }

    /// Source files in load order
    ///
    /// The declared `sources` list wins; otherwise the data directory is scanned.
    #[must_use]
    pub fn source_paths(&self) -> Vec<PathBuf> {
        let dir = self.data_dir();
        if self.sources.is_empty() {
            discover_sources(&dir)
        } else {
            self.sources.iter().map(|source| dir.join(source)).collect()
        }
    }
}
