//! Catalog - the immutable, explicitly constructed query context
//!
//! Everything a query needs is built once here and passed to the router.
//! Tests build catalogs from fixture data with [`Catalog::from_sources`].

use std::path::PathBuf;

use crate::adapters::toml::{LoadReport, LoadedSources, load_sources};
use crate::core::models::Revision;
use crate::core::services::{
    ControlIndex, CrosswalkResolver, EvidenceRequirements, GuidanceResolver, IndexStats,
    ScoreEngine, resolve_evidence_requirements,
};

/// Loaded and indexed reference data
#[derive(Debug, Default)]
pub struct Catalog {
    r2: ControlIndex,
    r3: ControlIndex,
    crosswalk: CrosswalkResolver,
    guidance: GuidanceResolver,
    score: ScoreEngine,
    report: LoadReport,
}

impl Catalog {
    /// Build a catalog from already-merged sources
    #[must_use]
    pub fn from_sources(sources: LoadedSources) -> Self {
        let r2 = ControlIndex::build(&sources.families_r2);
        let r3 = ControlIndex::build(&sources.families_r3);

        let crosswalk = CrosswalkResolver::new(
            sources.crosswalk.unwrap_or_default(),
            sources.odp.unwrap_or_default(),
            sources.migration_odp.unwrap_or_default(),
            sources.tailoring.unwrap_or_default(),
        );
        let guidance = GuidanceResolver::new(sources.guidance.unwrap_or_default());

        log::info!(
            "Indexed {} r2 control(s), {} r3 control(s), {} mapping(s), {} guidance entr(ies)",
            r2.len(),
            r3.len(),
            crosswalk.mapping_count(),
            guidance.len()
        );

        Self {
            r2,
            r3,
            crosswalk,
            guidance,
            score: ScoreEngine::new(),
            report: LoadReport::default(),
        }
    }

    /// Load source files in order and build a catalog
    #[must_use]
    pub fn load(paths: &[PathBuf]) -> Self {
        let (sources, report) = load_sources(paths);
        Self {
            report,
            ..Self::from_sources(sources)
        }
    }

    /// Index for a revision
    #[must_use]
    pub const fn index(&self, revision: Revision) -> &ControlIndex {
        match revision {
            Revision::R2 => &self.r2,
            Revision::R3 => &self.r3,
        }
    }

    /// Crosswalk, ODP and tailoring resolver
    #[must_use]
    pub const fn crosswalk(&self) -> &CrosswalkResolver {
        &self.crosswalk
    }

    /// Guidance resolver
    #[must_use]
    pub const fn guidance(&self) -> &GuidanceResolver {
        &self.guidance
    }

    /// SPRS score engine
    #[must_use]
    pub const fn score(&self) -> &ScoreEngine {
        &self.score
    }

    /// Report of the load that built this catalog
    #[must_use]
    pub const fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Statistics per revision
    #[must_use]
    pub fn stats(&self) -> [(Revision, IndexStats); 2] {
        Revision::ALL.map(|revision| (revision, self.index(revision).stats()))
    }

    /// Evidence requirements, checking Rev 2 before Rev 3
    #[must_use]
    pub fn evidence_requirements(&self, control_id: &str) -> Option<EvidenceRequirements> {
        resolve_evidence_requirements(&self.r2, &self.r3, control_id)
    }
}
