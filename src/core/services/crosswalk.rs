//! Crosswalk resolver - revision mappings, ODP values, 800-53 tailoring
//!
//! Every lookup is a pure function over immutable tables. "Not found" is an
//! ordinary answer, never an error.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::models::{
    ChangeType, CrosswalkEntry, OdpSet, TailoringRecord, family_for_control, family_name,
};

/// Note attached when neither ODP table knows a control
pub const NO_ODP_NOTE: &str = "Not all controls carry DoD-defined organization-defined parameters; \
     this control has none in either the primary or the migration table.";

/// Which ODP table answered a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OdpSource {
    /// The primary DoD ODP table
    Primary,
    /// The Rev 2 to Rev 3 migration table
    Migration,
}

/// Result of an ODP lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdpLookup<'a> {
    /// Found in one of the tables
    Found {
        /// Table that answered
        source: OdpSource,
        /// The parameter set
        set: &'a OdpSet,
    },
    /// Neither table has the control
    NotFound {
        /// Explanation for the caller
        note: &'static str,
    },
}

/// A Rev 3 requirement with no Rev 2 predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewControl {
    /// Rev 3 id
    pub id: &'static str,
    /// Requirement name
    pub name: &'static str,
}

/// A new control with its family resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewControlInfo {
    /// Rev 3 id
    pub id: &'static str,
    /// Requirement name
    pub name: &'static str,
    /// Family abbreviation
    pub family: &'static str,
    /// Family full name
    pub family_name: &'static str,
}

/// Requirements introduced by Rev 3
pub const NEW_REV3_CONTROLS: [NewControl; 18] = [
    NewControl { id: "03.04.10", name: "System Component Inventory" },
    NewControl { id: "03.04.11", name: "Information Location" },
    NewControl { id: "03.04.12", name: "System and Component Configuration for High-Risk Areas" },
    NewControl { id: "03.05.12", name: "Authenticator Management" },
    NewControl { id: "03.06.04", name: "Incident Response Training" },
    NewControl { id: "03.06.05", name: "Incident Response Plan" },
    NewControl { id: "03.11.04", name: "Risk Response" },
    NewControl { id: "03.12.05", name: "Information Exchange" },
    NewControl { id: "03.14.08", name: "Information Management and Retention" },
    NewControl { id: "03.15.01", name: "Policy and Procedures" },
    NewControl { id: "03.15.02", name: "System Security Plan" },
    NewControl { id: "03.15.03", name: "Rules of Behavior" },
    NewControl { id: "03.16.01", name: "Security Engineering Principles" },
    NewControl { id: "03.16.02", name: "Unsupported System Components" },
    NewControl { id: "03.16.03", name: "External System Services" },
    NewControl { id: "03.17.01", name: "Supply Chain Risk Management Plan" },
    NewControl { id: "03.17.02", name: "Acquisition Strategies, Tools, and Methods" },
    NewControl { id: "03.17.03", name: "Supply Chain Requirements and Processes" },
];

/// Resolver over the crosswalk, ODP and tailoring tables
#[derive(Debug, Clone, Default)]
pub struct CrosswalkResolver {
    crosswalk: HashMap<String, CrosswalkEntry>,
    odp: HashMap<String, OdpSet>,
    migration_odp: HashMap<String, OdpSet>,
    tailoring: HashMap<String, TailoringRecord>,
}

impl CrosswalkResolver {
    /// Create a resolver over already-loaded tables
    #[must_use]
    pub fn new(
        crosswalk: HashMap<String, CrosswalkEntry>,
        odp: HashMap<String, OdpSet>,
        migration_odp: HashMap<String, OdpSet>,
        tailoring: HashMap<String, TailoringRecord>,
    ) -> Self {
        Self {
            crosswalk,
            odp,
            migration_odp,
            tailoring,
        }
    }

    /// Exact-match lookup of a Rev 2 control's mapping
    #[must_use]
    pub fn resolve_mapping(&self, source_id: &str) -> Option<&CrosswalkEntry> {
        self.crosswalk.get(source_id.trim())
    }

    /// ODP lookup: primary table first, then the migration table
    #[must_use]
    pub fn resolve_odp(&self, control_id: &str) -> OdpLookup<'_> {
        let id = control_id.trim();
        if let Some(set) = self.odp.get(id) {
            return OdpLookup::Found {
                source: OdpSource::Primary,
                set,
            };
        }
        if let Some(set) = self.migration_odp.get(id) {
            return OdpLookup::Found {
                source: OdpSource::Migration,
                set,
            };
        }
        OdpLookup::NotFound { note: NO_ODP_NOTE }
    }

    /// 800-53 tailoring record for a control
    #[must_use]
    pub fn resolve_tailoring(&self, control_id: &str) -> Option<&TailoringRecord> {
        self.tailoring.get(control_id.trim())
    }

    /// Rev 3 requirements with no predecessor, with family names resolved
    #[must_use]
    pub fn list_new_controls() -> Vec<NewControlInfo> {
        NEW_REV3_CONTROLS
            .iter()
            .map(|c| {
                let family = family_for_control(c.id).map_or("??", |f| f.abbreviation);
                NewControlInfo {
                    id: c.id,
                    name: c.name,
                    family,
                    family_name: family_name(family).unwrap_or("Unknown"),
                }
            })
            .collect()
    }

    /// Number of crosswalk entries
    #[must_use]
    pub fn mapping_count(&self) -> usize {
        self.crosswalk.len()
    }

    /// Number of ODP sets across both tables
    #[must_use]
    pub fn odp_count(&self) -> usize {
        self.odp.len() + self.migration_odp.len()
    }
}

/// Human migration notes for a mapping
#[must_use]
pub fn migration_notes(source_id: &str, entry: &CrosswalkEntry) -> Vec<String> {
    let mut notes = Vec::new();

    match entry.change {
        ChangeType::Unchanged => {
            notes.push(format!("{source_id} carries over to {} without material change.", entry.target));
        },
        ChangeType::Minor => {
            notes.push(format!(
                "{source_id} maps to {} with minor changes; review wording against existing evidence.",
                entry.target
            ));
        },
        ChangeType::Significant => {
            notes.push(format!(
                "{source_id} maps to {} with significant changes; existing implementation may need rework.",
                entry.target
            ));
        },
        ChangeType::Consolidated => {
            notes.push(format!(
                "{source_id} is consolidated into {}; assess it together with the other merged requirements.",
                entry.target
            ));
        },
        ChangeType::Withdrawn => {
            notes.push(format!(
                "{source_id} is withdrawn in Rev 3; its intent is addressed by {}.",
                entry.target
            ));
        },
    }

    if !entry.new_odp_areas.is_empty() {
        notes.push(format!(
            "Rev 3 introduces organization-defined parameters for: {}.",
            entry.new_odp_areas.join(", ")
        ));
    }

    notes
}
