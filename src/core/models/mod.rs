//! Domain models for cmmc-query
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Family`], [`Control`], [`Objective`] - The two control catalogs
//! - [`CrosswalkEntry`], [`OdpSet`], [`TailoringRecord`] - Cross-references
//! - [`GuidanceEntry`] - Platform implementation guidance
//! - [`Revision`] - Which framework revision an id belongs to
//! - [`StatusBucket`] - Normalized assessment status
//! - [`AssessmentSnapshot`], [`PoamItem`] - Typed view of the handoff file

mod catalog;
mod crosswalk;
mod family_table;
mod guidance;
mod revision;
mod snapshot;
mod status;

pub use catalog::{Control, Family, Objective};
pub use crosswalk::{ChangeType, CrosswalkEntry, OdpParameter, OdpSet, TailoringRecord};
pub use family_table::{FAMILY_TABLE, FamilyInfo, family_for_control, family_name};
pub use guidance::{GuidanceEntry, TechnologySection};
pub use revision::Revision;
pub use snapshot::{AssessmentSnapshot, PoamItem};
pub use status::StatusBucket;
