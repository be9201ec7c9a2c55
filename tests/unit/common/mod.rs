//! Shared test fixtures and helpers
//!
//! Catalogs are built either from the shipped `data/` directory or from
//! inline TOML written to a temp directory. Snapshot bridges always live in
//! their own temp directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use cmmc_query::adapters::file::FileSnapshotBridge;
use cmmc_query::adapters::toml::discover_sources;
use cmmc_query::api::QueryRouter;
use cmmc_query::catalog::Catalog;
use serde_json::Value;
use tempfile::TempDir;

/// The catalog sources shipped with the crate
pub fn shipped_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Catalog built from the shipped sources
pub fn shipped_catalog() -> Catalog {
    Catalog::load(&discover_sources(&shipped_data_dir()))
}

/// A fixed clock for snapshot tests
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// A directory of catalog source files
pub struct SourceDir {
    dir: TempDir,
}

impl SourceDir {
    /// Create an empty source directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Get the directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a source file, returning its path
    pub fn add(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Load every source file in sorted order
    pub fn catalog(&self) -> Catalog {
        Catalog::load(&discover_sources(self.path()))
    }
}

/// A router over the shipped catalog with a bridge in a temp directory
pub struct TestRouter {
    /// Keeps the bridge directory alive
    dir: TempDir,
    /// The router under test
    pub router: QueryRouter,
}

impl TestRouter {
    /// Router over the shipped catalog
    pub fn shipped() -> Self {
        Self::with_catalog(shipped_catalog())
    }

    /// Router over a given catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bridge = FileSnapshotBridge::new(dir.path().join("bridge/assessment-snapshot.json"));
        Self {
            router: QueryRouter::new(Arc::new(catalog), Arc::new(bridge)),
            dir,
        }
    }

    /// The bridge file path
    pub fn bridge_path(&self) -> PathBuf {
        self.dir.path().join("bridge/assessment-snapshot.json")
    }

    /// A bridge over the same file, for writing at a chosen time
    pub fn bridge(&self) -> FileSnapshotBridge {
        FileSnapshotBridge::new(self.bridge_path())
    }

    /// Call a tool at [`noon`] and parse the envelope
    pub fn call(&self, tool: &str, params: Value) -> Value {
        let text = self.router.call_at(tool, &params, noon());
        serde_json::from_str(&text).expect("envelope is valid JSON")
    }

    /// Call a tool and return its data, asserting success
    pub fn data(&self, tool: &str, params: Value) -> Value {
        let response = self.call(tool, params);
        assert_eq!(response["success"], true, "{tool} failed: {response}");
        response["data"].clone()
    }
}
