//! Report what the catalog loaded

use super::Session;
use cmmc_query::output::{OutputMode, RevisionStats, StatsResult};

/// Show source and index statistics
pub fn stats(session: &Session, mode: OutputMode) -> anyhow::Result<()> {
    let catalog = session.router.catalog();
    let report = catalog.report();

    let result = StatsResult {
        version: cmmc_query::VERSION,
        sources_loaded: report.loaded.len(),
        sources_rejected: report.rejected.clone(),
        revisions: catalog
            .stats()
            .into_iter()
            .map(|(revision, stats)| RevisionStats { revision, stats })
            .collect(),
        mappings: catalog.crosswalk().mapping_count(),
        odp_sets: catalog.crosswalk().odp_count(),
        guidance_entries: catalog.guidance().len(),
        bridge_path: session.bridge_path.display().to_string(),
    };
    result.render(mode);
    Ok(())
}
