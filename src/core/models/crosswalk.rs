//! Cross-reference entities: revision crosswalk, ODP values, 800-53 tailoring

use serde::{Deserialize, Serialize};

/// How a Rev 2 requirement changed on its way into Rev 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Carried over without material change
    Unchanged,
    /// Editorial or minor scope change
    Minor,
    /// Substantive change in what must be done
    Significant,
    /// Merged into another requirement
    Consolidated,
    /// Removed with no successor
    Withdrawn,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged => write!(f, "unchanged"),
            Self::Minor => write!(f, "minor"),
            Self::Significant => write!(f, "significant"),
            Self::Consolidated => write!(f, "consolidated"),
            Self::Withdrawn => write!(f, "withdrawn"),
        }
    }
}

/// Mapping of one Rev 2 control to its Rev 3 counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrosswalkEntry {
    /// Rev 3 target id
    pub target: String,
    /// Change classification
    pub change: ChangeType,
    /// Free-text description of the change (collapses are described here)
    #[serde(default)]
    pub description: String,
    /// Areas where Rev 3 introduced new organization-defined parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_odp_areas: Vec<String>,
}

/// One organization-defined parameter with its fixed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OdpParameter {
    /// Parameter id (e.g. `A.03.01.01.ODP[01]`)
    pub id: String,
    /// Parameter name
    pub name: String,
    /// Value defined by the authority
    pub value: String,
}

/// Organization-defined parameter values attached to a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OdpSet {
    /// Human title
    pub title: String,
    /// Related control ids
    #[serde(default)]
    pub related: Vec<String>,
    /// Parameters in authored order
    #[serde(default)]
    pub parameters: Vec<OdpParameter>,
}

/// NIST SP 800-53 mapping and tailoring for an 800-171 control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TailoringRecord {
    /// Source 800-53 control ids
    pub controls: Vec<String>,
    /// Tailoring decision (e.g. "CUI", "NCO", "FED")
    pub tailoring: String,
    /// Additional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
