//! Source loading and merging
//!
//! Array-shaped collections (families) are concatenated across files in the
//! given order. Single-object collections (crosswalk, ODP tables, guidance,
//! 800-53 tailoring) come from the first file that defines them. A file that
//! fails to load contributes nothing; the rest still load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::core::models::{CrosswalkEntry, Family, GuidanceEntry, OdpSet, TailoringRecord};

use super::parser::load_file;

/// Merged content of all loaded sources
#[derive(Debug, Default)]
pub struct LoadedSources {
    /// Rev 2 families, concatenated
    pub families_r2: Vec<Family>,
    /// Rev 3 families, concatenated
    pub families_r3: Vec<Family>,
    /// First crosswalk found
    pub crosswalk: Option<HashMap<String, CrosswalkEntry>>,
    /// First primary ODP table found
    pub odp: Option<HashMap<String, OdpSet>>,
    /// First migration ODP table found
    pub migration_odp: Option<HashMap<String, OdpSet>>,
    /// First guidance table found
    pub guidance: Option<HashMap<String, GuidanceEntry>>,
    /// First 800-53 tailoring table found
    pub tailoring: Option<HashMap<String, TailoringRecord>>,
}

/// A source file that was skipped
#[derive(Debug, Clone, Serialize)]
pub struct RejectedSource {
    /// The file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// What happened during a load
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Files that contributed
    pub loaded: Vec<PathBuf>,
    /// Files that were skipped
    pub rejected: Vec<RejectedSource>,
}

fn take_first<T>(slot: &mut Option<T>, candidate: Option<T>, collection: &str, path: &Path) {
    match (slot.is_some(), candidate) {
        (false, Some(value)) => *slot = Some(value),
        (true, Some(_)) => {
            log::debug!("Ignoring {collection} from {}: already defined", path.display());
        },
        (_, None) => {},
    }
}

/// Load sources in order, skipping any that fail
#[must_use]
pub fn load_sources(paths: &[PathBuf]) -> (LoadedSources, LoadReport) {
    let mut merged = LoadedSources::default();
    let mut report = LoadReport::default();

    for path in paths {
        let file = match load_file(path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Skipping source {}: {e}", path.display());
                report.rejected.push(RejectedSource {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                continue;
            },
        };

        if file.is_empty() {
            log::debug!("Source {} defines no collections", path.display());
        }

        merged.families_r2.extend(file.families_r2);
        merged.families_r3.extend(file.families_r3);
        take_first(&mut merged.crosswalk, file.crosswalk, "crosswalk", path);
        take_first(&mut merged.odp, file.odp, "odp", path);
        take_first(&mut merged.migration_odp, file.migration_odp, "migration_odp", path);
        take_first(&mut merged.guidance, file.guidance, "guidance", path);
        take_first(&mut merged.tailoring, file.nist_800_53, "nist_800_53", path);

        report.loaded.push(path.clone());
    }

    log::info!(
        "Loaded {} source file(s), rejected {}",
        report.loaded.len(),
        report.rejected.len()
    );

    (merged, report)
}

/// Find every `*.toml` file under a directory, in sorted path order
#[must_use]
pub fn discover_sources(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Cannot walk {}: {e}", dir.display());
                None
            },
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();

    paths.sort();
    paths
}
