//! Guidance resolver - implementation guidance under historical id spellings
//!
//! Guidance was authored under several id conventions: the bare requirement
//! number (`3.1.1`) and CMMC practice ids with a family prefix (`AC.L2-3.1.1`).
//! Lookups try an explicit, ordered list of spellings and take the first hit.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::models::{FAMILY_TABLE, GuidanceEntry, TechnologySection};

/// Marker between a family abbreviation and the requirement number
const LEVEL2_MARKER: &str = ".L2-";

/// One way of spelling a control id as a guidance key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSpelling {
    /// The id exactly as given
    Bare,
    /// The id with any existing `XX.L2-` prefix removed
    Unprefixed,
    /// The id with a family prefix prepended (`AC` → `AC.L2-3.1.1`)
    FamilyPrefixed(&'static str),
}

impl IdSpelling {
    /// Apply this spelling; `None` when it does not apply to the id
    #[must_use]
    pub fn spell(self, id: &str) -> Option<String> {
        match self {
            Self::Bare => Some(id.to_string()),
            Self::Unprefixed => {
                id.split_once(LEVEL2_MARKER).map(|(_, number)| number.to_string())
            },
            Self::FamilyPrefixed(abbreviation) => {
                let number = id.split_once(LEVEL2_MARKER).map_or(id, |(_, n)| n);
                Some(format!("{abbreviation}{LEVEL2_MARKER}{number}"))
            },
        }
    }
}

/// The fixed priority order of spellings
#[must_use]
pub fn id_spellings() -> Vec<IdSpelling> {
    let mut spellings = vec![IdSpelling::Bare, IdSpelling::Unprefixed];
    spellings.extend(FAMILY_TABLE.iter().map(|f| IdSpelling::FamilyPrefixed(f.abbreviation)));
    spellings
}

/// Matched guidance, possibly filtered by technology
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGuidance<'a> {
    /// The guidance key that matched
    pub matched_key: String,
    /// Summary from the entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a str>,
    /// Technology filter that was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_filter: Option<String>,
    /// Number of sections before filtering
    pub total_sections: usize,
    /// Sections after filtering
    pub sections: Vec<&'a TechnologySection>,
}

/// Resolver over the guidance table
#[derive(Debug, Clone, Default)]
pub struct GuidanceResolver {
    entries: HashMap<String, GuidanceEntry>,
    spellings: Vec<IdSpelling>,
}

impl GuidanceResolver {
    /// Create a resolver using the default spelling order
    #[must_use]
    pub fn new(entries: HashMap<String, GuidanceEntry>) -> Self {
        Self {
            entries,
            spellings: id_spellings(),
        }
    }

    /// Find guidance for a control, optionally keeping only matching technologies
    ///
    /// An empty filtered section list is a valid answer.
    #[must_use]
    pub fn resolve_guidance(
        &self,
        control_id: &str,
        technology: Option<&str>,
    ) -> Option<ResolvedGuidance<'_>> {
        let id = control_id.trim();
        let (matched_key, entry) = self
            .spellings
            .iter()
            .filter_map(|spelling| spelling.spell(id))
            .find_map(|key| self.entries.get(&key).map(|entry| (key, entry)))?;

        let filter = technology.map(str::trim).filter(|t| !t.is_empty());
        let sections = entry
            .sections
            .iter()
            .filter(|s| filter.is_none_or(|f| s.matches_technology(f)))
            .collect();

        Some(ResolvedGuidance {
            matched_key,
            summary: entry.summary.as_deref(),
            technology_filter: filter.map(String::from),
            total_sections: entry.sections.len(),
            sections,
        })
    }

    /// Number of guidance entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is no guidance at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
