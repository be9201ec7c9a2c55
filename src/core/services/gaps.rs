//! Gap analyzer - turns a raw status map into a prioritized remediation list

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::models::StatusBucket;

use super::index::ControlIndex;
use super::score::{CONDITIONAL_THRESHOLD, ScoreEngine};

/// Classification of a not-met requirement the point table does not score
pub const UNSCORED_CLASSIFICATION: &str = "not scored";

static TRAILING_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\[[^\]]*\])+$").expect("static regex"));

/// Reduce an objective id to its parent control id
///
/// Strips trailing bracketed suffixes, then a trailing lowercase letter, then a
/// dangling `.`, then any `XX.L2-` practice prefix. Pure string transform; the
/// result still has to be checked against a catalog.
#[must_use]
pub fn derive_control_id(objective_id: &str) -> String {
    let trimmed = objective_id.trim();
    let mut id = TRAILING_BRACKETS.replace(trimmed, "").into_owned();

    if id.ends_with(|c: char| c.is_ascii_lowercase()) {
        id.pop();
    }
    if id.ends_with('.') {
        id.pop();
    }
    match id.split_once(".L2-") {
        Some((_, number)) => number.to_string(),
        None => id,
    }
}

/// Status counts per bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCounts {
    /// Entries in the map
    pub total: usize,
    /// Met
    pub met: usize,
    /// Not met
    pub not_met: usize,
    /// Partially met
    pub partially_met: usize,
    /// Not assessed or unrecognized
    pub not_assessed: usize,
}

impl BucketCounts {
    fn add(&mut self, bucket: StatusBucket) {
        self.total += 1;
        match bucket {
            StatusBucket::Met => self.met += 1,
            StatusBucket::NotMet => self.not_met += 1,
            StatusBucket::PartiallyMet => self.partially_met += 1,
            StatusBucket::NotAssessed => self.not_assessed += 1,
        }
    }
}

/// One prioritized remediation gap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    /// Control id
    pub control_id: String,
    /// SPRS deduction
    pub points: u8,
    /// Whether the control can never be deferred
    pub never_deferrable: bool,
    /// Human eligibility classification
    pub classification: String,
    /// Status-map keys that reported this control not met
    pub reported_by: Vec<String>,
}

/// Gap analysis output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    /// Bucket counts over the raw map
    pub summary: BucketCounts,
    /// Estimated SPRS score
    pub estimated_score: i32,
    /// Total deduction
    pub deduction: u32,
    /// Never-deferrable gaps
    pub critical: Vec<Gap>,
    /// 5-point gaps that are deferrable
    pub high_priority: Vec<Gap>,
    /// Every gap, prioritized
    pub gaps: Vec<Gap>,
    /// Not-met keys whose derived control id is unknown
    pub unmapped: Vec<String>,
    /// Templated next steps
    pub recommendations: Vec<String>,
}

/// Analyzer over the score engine and the primary index
#[derive(Debug, Clone, Copy)]
pub struct GapAnalyzer<'a> {
    engine: &'a ScoreEngine,
    index: &'a ControlIndex,
}

impl<'a> GapAnalyzer<'a> {
    /// Create an analyzer
    #[must_use]
    pub const fn new(engine: &'a ScoreEngine, index: &'a ControlIndex) -> Self {
        Self { engine, index }
    }

    fn is_known(&self, control_id: &str) -> bool {
        self.engine.points(control_id).is_some() || self.index.contains(control_id)
    }

    /// Analyze a status map keyed by objective or control id
    #[must_use]
    pub fn analyze(&self, statuses: &BTreeMap<String, String>) -> GapReport {
        let mut summary = BucketCounts::default();
        let mut reported: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut unmapped = BTreeSet::new();

        for (key, raw) in statuses {
            let bucket = StatusBucket::normalize(raw);
            summary.add(bucket);
            if bucket != StatusBucket::NotMet {
                continue;
            }

            let control_id = derive_control_id(key);
            if self.is_known(&control_id) {
                reported.entry(control_id).or_default().push(key.clone());
            } else {
                log::debug!("Status key {key} does not map to a known control");
                unmapped.insert(key.clone());
            }
        }

        let not_met: Vec<&str> = reported.keys().map(String::as_str).collect();
        let impact = self.engine.compute_impact(&not_met);

        let mut gaps: Vec<Gap> = impact
            .breakdown
            .into_iter()
            .map(|info| Gap {
                reported_by: reported.remove(&info.control_id).unwrap_or_default(),
                control_id: info.control_id,
                points: info.points,
                never_deferrable: info.never_deferrable,
                classification: info.classification,
            })
            .collect();
        // indexed but absent from the point table (e.g. 3.12.4)
        gaps.extend(impact.unknown_ids.into_iter().map(|control_id| Gap {
            reported_by: reported.remove(&control_id).unwrap_or_default(),
            control_id,
            points: 0,
            never_deferrable: false,
            classification: UNSCORED_CLASSIFICATION.to_string(),
        }));
        // never-deferrable first, then by deduction; breakdown is already in id order
        gaps.sort_by(|a, b| {
            b.never_deferrable.cmp(&a.never_deferrable).then(b.points.cmp(&a.points))
        });

        let critical: Vec<Gap> = gaps.iter().filter(|g| g.never_deferrable).cloned().collect();
        let high_priority: Vec<Gap> =
            gaps.iter().filter(|g| !g.never_deferrable && g.points == 5).cloned().collect();

        let unmapped: Vec<String> = unmapped.into_iter().collect();
        let recommendations = recommendations(&Findings {
            summary: &summary,
            score: impact.score,
            critical: &critical,
            high_priority: high_priority.len(),
            gaps: &gaps,
            unmapped: &unmapped,
        });

        GapReport {
            summary,
            estimated_score: impact.score,
            deduction: impact.deduction,
            critical,
            high_priority,
            gaps,
            unmapped,
            recommendations,
        }
    }
}

struct Findings<'a> {
    summary: &'a BucketCounts,
    score: i32,
    critical: &'a [Gap],
    high_priority: usize,
    gaps: &'a [Gap],
    unmapped: &'a [String],
}

fn recommendations(findings: &Findings<'_>) -> Vec<String> {
    let Findings {
        summary,
        score,
        critical,
        high_priority,
        gaps,
        unmapped,
    } = *findings;
    let mut out = Vec::new();

    if !critical.is_empty() {
        let ids: Vec<&str> = critical.iter().map(|g| g.control_id.as_str()).collect();
        out.push(format!(
            "Resolve {} never-deferrable gap(s) first ({}); they block certification regardless of score.",
            critical.len(),
            ids.join(", ")
        ));
    }
    if score < CONDITIONAL_THRESHOLD {
        out.push(format!(
            "Estimated score {score} is below the {CONDITIONAL_THRESHOLD} minimum for conditional status."
        ));
    }
    if high_priority > 0 {
        out.push(format!(
            "{high_priority} 5-point gap(s) remain; each can go on a POA&M but costs 5 points until closed."
        ));
    }
    if summary.partially_met > 0 {
        out.push(format!(
            "{} item(s) are partially met; finish them before they can be counted as met.",
            summary.partially_met
        ));
    }
    if summary.not_assessed > 0 {
        out.push(format!(
            "{} item(s) are not assessed; complete the assessment before relying on this score.",
            summary.not_assessed
        ));
    }
    let unscored: Vec<&str> =
        gaps.iter().filter(|g| g.points == 0).map(|g| g.control_id.as_str()).collect();
    if !unscored.is_empty() {
        out.push(format!(
            "{} not-met requirement(s) carry no SPRS points ({}) but still have to be implemented.",
            unscored.len(),
            unscored.join(", ")
        ));
    }
    if !unmapped.is_empty() {
        out.push(format!(
            "{} not-met item(s) do not match a known requirement; check their ids.",
            unmapped.len()
        ));
    }
    if out.is_empty() && summary.not_met == 0 && summary.partially_met == 0 {
        out.push("All assessed requirements are met.".to_string());
    }

    out
}
