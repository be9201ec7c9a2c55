//! Control index - flattened, id-keyed view of one revision's catalog
//!
//! Entries keep authored order so that listing and search ties are stable.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::models::{Family, Objective};

/// A control flattened together with its family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedControl {
    /// Owning family id
    pub family_id: String,
    /// Owning family name
    pub family_name: String,
    /// Control id
    pub control_id: String,
    /// Control name
    pub control_name: String,
    /// Requirement text
    pub description: String,
    /// Objectives in authored order
    pub objectives: Vec<Objective>,
}

/// Per-family counts for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySummary {
    /// Family id
    pub id: String,
    /// Family name
    pub name: String,
    /// Number of indexed controls
    pub control_count: usize,
    /// Number of objectives across those controls
    pub objective_count: usize,
}

/// Build-time statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Total families
    pub families: usize,
    /// Total controls
    pub controls: usize,
    /// Total objectives
    pub objectives: usize,
}

/// A search hit
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit<'a> {
    /// Relevance score, always positive
    pub score: u32,
    /// The matched control
    #[serde(flatten)]
    pub control: &'a IndexedControl,
}

/// Id-keyed index over one revision
#[derive(Debug, Clone, Default)]
pub struct ControlIndex {
    entries: Vec<IndexedControl>,
    by_id: HashMap<String, usize>,
    families: Vec<FamilySummary>,
    stats: IndexStats,
}

impl ControlIndex {
    /// Build an index from families in authored order
    ///
    /// A control id seen twice keeps its first definition.
    #[must_use]
    pub fn build(families: &[Family]) -> Self {
        let mut index = Self::default();

        for family in families {
            let mut summary = FamilySummary {
                id: family.id.clone(),
                name: family.name.clone(),
                control_count: 0,
                objective_count: 0,
            };

            for control in &family.controls {
                if index.by_id.contains_key(&control.id) {
                    log::debug!("Duplicate control {} in family {} ignored", control.id, family.id);
                    continue;
                }

                let objectives = control.objectives().to_vec();
                summary.control_count += 1;
                summary.objective_count += objectives.len();

                index.by_id.insert(control.id.clone(), index.entries.len());
                index.entries.push(IndexedControl {
                    family_id: family.id.clone(),
                    family_name: family.name.clone(),
                    control_id: control.id.clone(),
                    control_name: control.name.clone(),
                    description: control.description.clone(),
                    objectives,
                });
            }

            index.stats.controls += summary.control_count;
            index.stats.objectives += summary.objective_count;
            index.families.push(summary);
        }

        index.stats.families = index.families.len();
        index
    }

    /// Point lookup by control id
    #[must_use]
    pub fn get(&self, control_id: &str) -> Option<&IndexedControl> {
        self.by_id.get(control_id.trim()).map(|&i| &self.entries[i])
    }

    /// Whether a control id is indexed
    #[must_use]
    pub fn contains(&self, control_id: &str) -> bool {
        self.by_id.contains_key(control_id.trim())
    }

    /// All controls in authored order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedControl> {
        self.entries.iter()
    }

    /// Per-family summaries in authored order
    #[must_use]
    pub fn families(&self) -> &[FamilySummary] {
        &self.families
    }

    /// Statistics computed at build time
    #[must_use]
    pub const fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Number of indexed controls
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weighted keyword search
    ///
    /// Score is 3 for a name hit, 2 for a description hit, and 1 per objective
    /// whose text hits. Zero-score controls are dropped; ties keep authored order.
    #[must_use]
    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .iter()
            .filter_map(|control| {
                let score = relevance(control, &needle);
                (score > 0).then_some(SearchHit { score, control })
            })
            .collect();

        // stable: equal scores stay in authored order
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(max_results);
        hits
    }
}

fn relevance(control: &IndexedControl, needle: &str) -> u32 {
    let mut score: u32 = 0;
    if control.control_name.to_lowercase().contains(needle) {
        score += 3;
    }
    if control.description.to_lowercase().contains(needle) {
        score += 2;
    }
    let objective_hits =
        control.objectives.iter().filter(|o| o.text.to_lowercase().contains(needle)).count();
    score.saturating_add(u32::try_from(objective_hits).unwrap_or(u32::MAX))
}
