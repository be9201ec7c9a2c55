//! POA&M summary over snapshot-carried items

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::core::models::PoamItem;

use super::gaps::derive_control_id;
use super::score::ScoreEngine;

const CLOSED_STATUSES: [&str; 5] = ["closed", "completed", "complete", "done", "resolved"];

/// An item past its scheduled completion date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueItem {
    /// Item id
    pub id: String,
    /// Control remediated
    pub control_id: String,
    /// Scheduled completion date
    pub scheduled_completion: NaiveDate,
    /// Days past due
    pub days_overdue: i64,
}

/// POA&M summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoamSummary {
    /// Total items
    pub total: usize,
    /// Items not closed
    pub open: usize,
    /// Count per normalized status
    pub by_status: BTreeMap<String, usize>,
    /// Open items past due, most overdue first
    pub overdue: Vec<OverdueItem>,
    /// Items remediating never-deferrable controls
    pub ineligible: Vec<String>,
    /// Items with a completion date that could not be read
    pub undated: Vec<String>,
}

fn normalize_status(raw: &str) -> String {
    let status = raw.trim().to_lowercase().replace(['_', '-'], " ");
    if status.is_empty() { "unknown".to_string() } else { status }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Summarize POA&M items as of `today`
#[must_use]
pub fn summarize_poam(items: &[PoamItem], today: NaiveDate, engine: &ScoreEngine) -> PoamSummary {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut overdue = Vec::new();
    let mut ineligible = Vec::new();
    let mut undated = Vec::new();
    let mut open = 0;

    for item in items {
        let status = normalize_status(&item.status);
        let closed = CLOSED_STATUSES.contains(&status.as_str());
        *by_status.entry(status).or_default() += 1;

        let control_id = derive_control_id(&item.control_id);
        if engine.is_never_deferrable(&control_id) {
            ineligible.push(item.id.clone());
        }
        if closed {
            continue;
        }
        open += 1;

        match item.scheduled_completion.as_deref().map(parse_date) {
            Some(Some(due)) if due < today => overdue.push(OverdueItem {
                id: item.id.clone(),
                control_id,
                scheduled_completion: due,
                days_overdue: (today - due).num_days(),
            }),
            Some(None) => undated.push(item.id.clone()),
            _ => {},
        }
    }

    overdue.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue).then_with(|| a.id.cmp(&b.id)));

    PoamSummary {
        total: items.len(),
        open,
        by_status,
        overdue,
        ineligible,
        undated,
    }
}
