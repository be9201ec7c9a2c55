//! Control catalog entities
//!
//! A catalog is an ordered list of families, each holding ordered controls,
//! each holding ordered objectives. Order is authored order and is preserved.

use serde::{Deserialize, Serialize};

/// A grouping of related controls (e.g. "Access Control")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Family {
    /// Family id, unique per revision (e.g. "AC" or "3.1")
    pub id: String,
    /// Human name
    pub name: String,
    /// Controls in authored order
    #[serde(default)]
    pub controls: Vec<Control>,
}

/// A single compliance requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Control {
    /// Control id (`3.1.1` or `03.01.01`)
    pub id: String,
    /// Short requirement name
    pub name: String,
    /// Requirement text
    #[serde(default)]
    pub description: String,
    /// Assessment objectives; `None` when the source omits the field entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<Objective>>,
}

impl Control {
    /// Objectives, or an empty slice when none were authored
    #[must_use]
    pub fn objectives(&self) -> &[Objective] {
        self.objectives.as_deref().unwrap_or_default()
    }
}

/// An atomic, assessable sub-requirement of a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Objective {
    /// Objective id: control id plus bracketed suffix (e.g. `3.1.1[a]`)
    pub id: String,
    /// Requirement statement
    pub text: String,
    /// Optional external cross-reference (e.g. an 800-53 determination id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
}
