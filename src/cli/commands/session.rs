//! Query session: config, catalog and snapshot bridge wired together

use std::path::PathBuf;
use std::sync::Arc;

use cmmc_query::adapters::file::FileSnapshotBridge;
use cmmc_query::api::QueryRouter;
use cmmc_query::catalog::Catalog;
use cmmc_query::config::Config;

/// Everything a command needs to answer queries
#[derive(Debug)]
pub struct Session {
    /// Router over the loaded catalog
    pub router: QueryRouter,
    /// Snapshot bridge file in use
    pub bridge_path: PathBuf,
}

impl Session {
    /// Load config, apply command-line overrides, and build the catalog
    pub fn open(data_dir: Option<PathBuf>, bridge: Option<PathBuf>) -> Self {
        let mut config = Config::load();
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        if bridge.is_some() {
            config.bridge_path = bridge;
        }

        let sources = config.source_paths();
        if sources.is_empty() {
            log::warn!("No catalog sources found in {}", config.data_dir().display());
        }

        let catalog = Catalog::load(&sources);

        let bridge_path = config.bridge_path();
        let store = FileSnapshotBridge::new(bridge_path.clone());

        Self {
            router: QueryRouter::new(Arc::new(catalog), Arc::new(store)),
            bridge_path,
        }
    }
}
