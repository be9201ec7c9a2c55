//! Implementation guidance entities

use serde::{Deserialize, Serialize};

/// Platform-specific guidance for satisfying one control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuidanceEntry {
    /// Optional overall summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Per-technology sections
    #[serde(default)]
    pub sections: Vec<TechnologySection>,
}

/// Guidance for one technology or platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechnologySection {
    /// Technology name (e.g. "Azure", "AWS GovCloud")
    pub technology: String,
    /// Platform detail (e.g. "Entra ID")
    #[serde(default)]
    pub platform: String,
    /// Section title
    #[serde(default)]
    pub title: String,
    /// Implementation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Verification checks
    #[serde(default)]
    pub verification: Vec<String>,
    /// Cost estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<String>,
    /// Effort estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_estimate: Option<String>,
}

impl TechnologySection {
    /// Case-insensitive substring match against technology, platform and title
    #[must_use]
    pub fn matches_technology(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        [&self.technology, &self.platform, &self.title]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
