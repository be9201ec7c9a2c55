//! Query services over the immutable catalog
//!
//! - [`index`] - Id-keyed control index and weighted search
//! - [`crosswalk`] - Revision mappings, ODP values, 800-53 tailoring
//! - [`guidance`] - Implementation guidance under historical id spellings
//! - [`evidence`] - Evidence checklists per control
//! - [`score`] - SPRS scoring
//! - [`gaps`] - Prioritized gap analysis
//! - [`poam`] - POA&M summary

pub mod crosswalk;
pub mod evidence;
pub mod gaps;
pub mod guidance;
pub mod index;
pub mod poam;
pub mod score;

pub use crosswalk::{CrosswalkResolver, NewControlInfo, OdpLookup, OdpSource, migration_notes};
pub use evidence::{EvidenceRequirements, resolve_evidence_requirements};
pub use gaps::{GapAnalyzer, GapReport, derive_control_id};
pub use guidance::{GuidanceResolver, IdSpelling, ResolvedGuidance, id_spellings};
pub use index::{ControlIndex, FamilySummary, IndexStats, IndexedControl, SearchHit};
pub use poam::{PoamSummary, summarize_poam};
pub use score::{
    CONDITIONAL_THRESHOLD, Eligibility, MAX_SCORE, MIN_SCORE, Methodology, ScoreEngine, ScoreImpact,
    ScoreInfo, SeverityBand,
};
