//! SPRS score engine
//!
//! The DoD Assessment Methodology starts every assessment at [`MAX_SCORE`] and
//! subtracts a fixed 1, 3 or 5 point deduction per requirement that is not met.
//! A handful of requirements can never be deferred to a POA&M.

use std::collections::BTreeSet;

use serde::Serialize;

/// Baseline score when every requirement is met
pub const MAX_SCORE: i32 = 110;

/// Lowest possible score
pub const MIN_SCORE: i32 = -203;

/// Minimum score for conditional (POA&M) certification status
pub const CONDITIONAL_THRESHOLD: i32 = 88;

/// Point deduction per Rev 2 requirement
///
/// 3.12.4 (system security plan) carries no deduction: without a plan there
/// is no assessment to score, so it is absent from the table.
pub const POINT_TABLE: [(&str, u8); 109] = [
    ("3.1.1", 5), ("3.1.2", 5), ("3.1.3", 1), ("3.1.4", 1), ("3.1.5", 3), ("3.1.6", 1),
    ("3.1.7", 1), ("3.1.8", 1), ("3.1.9", 1), ("3.1.10", 1), ("3.1.11", 1), ("3.1.12", 5),
    ("3.1.13", 5), ("3.1.14", 1), ("3.1.15", 1), ("3.1.16", 5), ("3.1.17", 5), ("3.1.18", 5),
    ("3.1.19", 3), ("3.1.20", 1), ("3.1.21", 1), ("3.1.22", 1),
    ("3.2.1", 5), ("3.2.2", 5), ("3.2.3", 1),
    ("3.3.1", 5), ("3.3.2", 3), ("3.3.3", 1), ("3.3.4", 1), ("3.3.5", 5), ("3.3.6", 1),
    ("3.3.7", 1), ("3.3.8", 1), ("3.3.9", 1),
    ("3.4.1", 5), ("3.4.2", 5), ("3.4.3", 1), ("3.4.4", 1), ("3.4.5", 5), ("3.4.6", 5),
    ("3.4.7", 5), ("3.4.8", 5), ("3.4.9", 1),
    ("3.5.1", 5), ("3.5.2", 5), ("3.5.3", 5), ("3.5.4", 1), ("3.5.5", 1), ("3.5.6", 1),
    ("3.5.7", 1), ("3.5.8", 1), ("3.5.9", 1), ("3.5.10", 5), ("3.5.11", 1),
    ("3.6.1", 5), ("3.6.2", 5), ("3.6.3", 1),
    ("3.7.1", 3), ("3.7.2", 5), ("3.7.3", 1), ("3.7.4", 3), ("3.7.5", 5), ("3.7.6", 1),
    ("3.8.1", 3), ("3.8.2", 3), ("3.8.3", 5), ("3.8.4", 1), ("3.8.5", 1), ("3.8.6", 1),
    ("3.8.7", 5), ("3.8.8", 3), ("3.8.9", 1),
    ("3.9.1", 3), ("3.9.2", 5),
    ("3.10.1", 5), ("3.10.2", 5), ("3.10.3", 1), ("3.10.4", 1), ("3.10.5", 1), ("3.10.6", 1),
    ("3.11.1", 3), ("3.11.2", 5), ("3.11.3", 1),
    ("3.12.1", 5), ("3.12.2", 3), ("3.12.3", 5),
    ("3.13.1", 5), ("3.13.2", 5), ("3.13.3", 1), ("3.13.4", 1), ("3.13.5", 5), ("3.13.6", 5),
    ("3.13.7", 1), ("3.13.8", 3), ("3.13.9", 1), ("3.13.10", 1), ("3.13.11", 5), ("3.13.12", 1),
    ("3.13.13", 1), ("3.13.14", 1), ("3.13.15", 5), ("3.13.16", 1),
    ("3.14.1", 5), ("3.14.2", 5), ("3.14.3", 5), ("3.14.4", 5), ("3.14.5", 3), ("3.14.6", 5),
    ("3.14.7", 3),
];

/// Requirements that must be fully implemented and can never sit on a POA&M
pub const NEVER_DEFERRABLE: [&str; 7] =
    ["3.1.20", "3.1.22", "3.5.3", "3.10.3", "3.10.4", "3.10.5", "3.13.11"];

#[allow(clippy::cast_lossless)]
const fn point_total() -> i32 {
    let mut total = 0;
    let mut i = 0;
    while i < POINT_TABLE.len() {
        total += POINT_TABLE[i].1 as i32;
        i += 1;
    }
    total
}

const _: () = assert!(point_total() == MAX_SCORE - MIN_SCORE, "SPRS point table total drifted");

/// POA&M eligibility of a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Never deferrable
    MustBeFullyImplemented,
    /// Deferrable, 5-point deduction
    DeferrableHighImpact,
    /// Deferrable
    Deferrable,
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MustBeFullyImplemented => write!(f, "must be fully implemented"),
            Self::DeferrableHighImpact => write!(f, "deferrable but high-impact"),
            Self::Deferrable => write!(f, "deferrable"),
        }
    }
}

/// Severity of a total deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    /// Nothing deducted
    ExactPass,
    /// 1-10 points
    Minor,
    /// 11-30 points
    Moderate,
    /// 31-60 points
    Significant,
    /// More than 60 points
    Critical,
}

impl SeverityBand {
    /// Band for a total deduction
    #[must_use]
    pub const fn for_deduction(deduction: u32) -> Self {
        match deduction {
            0 => Self::ExactPass,
            1..=10 => Self::Minor,
            11..=30 => Self::Moderate,
            31..=60 => Self::Significant,
            _ => Self::Critical,
        }
    }
}

/// Score classification of one requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInfo {
    /// Control id
    pub control_id: String,
    /// Point deduction when not met
    pub points: u8,
    /// Whether the requirement can never be deferred
    pub never_deferrable: bool,
    /// Eligibility class
    pub eligibility: Eligibility,
    /// Human-readable eligibility
    pub classification: String,
}

/// Result of scoring a set of not-met requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreImpact {
    /// Resulting score
    pub score: i32,
    /// Sum of deductions
    pub deduction: u32,
    /// Severity band of the deduction
    pub severity: SeverityBand,
    /// Per-requirement breakdown in id order
    pub breakdown: Vec<ScoreInfo>,
    /// Never-deferrable requirements present (hard blockers)
    pub blockers: Vec<String>,
    /// Ids not present in the point table
    pub unknown_ids: Vec<String>,
}

/// Counts of requirements per point value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Methodology {
    /// Baseline maximum
    pub max_score: i32,
    /// Floor
    pub min_score: i32,
    /// Conditional status threshold
    pub conditional_threshold: i32,
    /// Scored requirements
    pub scored_controls: usize,
    /// Requirements worth 5 points
    pub five_point: usize,
    /// Requirements worth 3 points
    pub three_point: usize,
    /// Requirements worth 1 point
    pub one_point: usize,
    /// Never-deferrable requirements
    pub never_deferrable: Vec<&'static str>,
}

/// Engine over the fixed point table
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    /// Create an engine
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Point value of a requirement
    #[must_use]
    pub fn points(&self, control_id: &str) -> Option<u8> {
        let id = control_id.trim();
        POINT_TABLE.iter().find(|(c, _)| *c == id).map(|&(_, points)| points)
    }

    /// Whether a requirement is never deferrable
    #[must_use]
    pub fn is_never_deferrable(&self, control_id: &str) -> bool {
        NEVER_DEFERRABLE.contains(&control_id.trim())
    }

    /// Classification of one requirement, `None` when not in the table
    #[must_use]
    pub fn score_of(&self, control_id: &str) -> Option<ScoreInfo> {
        let id = control_id.trim();
        let points = self.points(id)?;
        let never_deferrable = self.is_never_deferrable(id);

        let eligibility = if never_deferrable {
            Eligibility::MustBeFullyImplemented
        } else if points == 5 {
            Eligibility::DeferrableHighImpact
        } else {
            Eligibility::Deferrable
        };

        Some(ScoreInfo {
            control_id: id.to_string(),
            points,
            never_deferrable,
            eligibility,
            classification: eligibility.to_string(),
        })
    }

    /// Score a batch of not-met requirements
    ///
    /// Duplicates and ordering do not matter; unknown ids are reported and skipped.
    #[must_use]
    pub fn compute_impact<S: AsRef<str>>(&self, not_met: &[S]) -> ScoreImpact {
        let unique: BTreeSet<&str> =
            not_met.iter().map(|id| id.as_ref().trim()).filter(|id| !id.is_empty()).collect();

        let mut breakdown = Vec::new();
        let mut unknown_ids = Vec::new();
        for id in unique {
            match self.score_of(id) {
                Some(info) => breakdown.push(info),
                None => unknown_ids.push(id.to_string()),
            }
        }

        let deduction: u32 = breakdown.iter().map(|info| u32::from(info.points)).sum();
        let blockers =
            breakdown.iter().filter(|i| i.never_deferrable).map(|i| i.control_id.clone()).collect();

        ScoreImpact {
            score: MAX_SCORE - i32::try_from(deduction).unwrap_or(i32::MAX),
            deduction,
            severity: SeverityBand::for_deduction(deduction),
            breakdown,
            blockers,
            unknown_ids,
        }
    }

    /// Overview of the methodology
    #[must_use]
    pub fn methodology(&self) -> Methodology {
        let count = |value: u8| POINT_TABLE.iter().filter(|(_, p)| *p == value).count();
        Methodology {
            max_score: MAX_SCORE,
            min_score: MIN_SCORE,
            conditional_threshold: CONDITIONAL_THRESHOLD,
            scored_controls: POINT_TABLE.len(),
            five_point: count(5),
            three_point: count(3),
            one_point: count(1),
            never_deferrable: NEVER_DEFERRABLE.to_vec(),
        }
    }
}
