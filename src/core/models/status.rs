//! Assessment status buckets
//!
//! Statuses arrive as free text from an external UI. Matching ignores case and
//! punctuation, and nothing is ever rejected: unknown text is `NotAssessed`.

use serde::{Deserialize, Serialize};

/// Canonical assessment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// Fully implemented
    Met,
    /// Not implemented
    NotMet,
    /// Partially implemented
    PartiallyMet,
    /// Not yet assessed, or unrecognized
    #[default]
    NotAssessed,
}

impl StatusBucket {
    /// Normalize free-form status text into a bucket
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "met" | "implemented" | "compliant" | "satisfied" | "pass" | "passed" => Self::Met,
            "notmet" | "notimplemented" | "noncompliant" | "notsatisfied" | "fail" | "failed" => {
                Self::NotMet
            },
            "partiallymet" | "partial" | "partiallyimplemented" | "partiallycompliant" => {
                Self::PartiallyMet
            },
            _ => Self::NotAssessed,
        }
    }
}

impl std::fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Met => write!(f, "met"),
            Self::NotMet => write!(f, "not_met"),
            Self::PartiallyMet => write!(f, "partially_met"),
            Self::NotAssessed => write!(f, "not_assessed"),
        }
    }
}
