//! Framework revisions
//!
//! NIST SP 800-171 Rev 2 ids look like `3.1.1`; Rev 3 ids look like `03.01.01`.

use serde::{Deserialize, Serialize};

/// A framework revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// NIST SP 800-171 Rev 2 (the CMMC Level 2 baseline)
    #[default]
    R2,
    /// NIST SP 800-171 Rev 3
    R3,
}

impl Revision {
    /// Both revisions, primary first
    pub const ALL: [Self; 2] = [Self::R2, Self::R3];
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R2 => write!(f, "r2"),
            Self::R3 => write!(f, "r3"),
        }
    }
}

impl std::str::FromStr for Revision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r2" | "rev2" | "2" => Ok(Self::R2),
            "r3" | "rev3" | "3" => Ok(Self::R3),
            _ => Err(format!("Invalid revision: {s}. Use: r2, r3")),
        }
    }
}
