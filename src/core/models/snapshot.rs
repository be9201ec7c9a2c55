//! Snapshot-carried entities
//!
//! The snapshot is written by an external UI, so every field is optional and
//! a few historical key spellings are accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys that carry the status map, merged in this order
const STATUS_KEYS: [&str; 3] = ["statuses", "objectiveStatus", "assessmentData"];

/// Keys that carry POA&M items, concatenated in this order
const POAM_KEYS: [&str; 2] = ["poamItems", "poam"];

/// Typed view of an assessment snapshot
///
/// Built field by field: a malformed field degrades to empty instead of
/// failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssessmentSnapshot {
    /// Status per objective or control id; values are strings or `{ "status": ... }`
    pub statuses: BTreeMap<String, Value>,
    /// Plan-of-action items that could be read
    pub poam_items: Vec<PoamItem>,
    /// Export timestamp (RFC 3339)
    pub exported_at: Option<String>,
    /// Producer tag
    pub source: Option<String>,
}

impl AssessmentSnapshot {
    /// Read a snapshot from raw JSON
    ///
    /// When several status keys are present the first one to name an id wins.
    /// POA&M items that do not deserialize are logged and skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut statuses = BTreeMap::new();
        for key in STATUS_KEYS {
            match value.get(key) {
                None | Some(Value::Null) => {},
                Some(Value::Object(map)) => {
                    for (id, status) in map {
                        statuses.entry(id.clone()).or_insert_with(|| status.clone());
                    }
                },
                Some(_) => log::warn!("Snapshot field {key} is not an object; ignored"),
            }
        }

        let mut poam_items = Vec::new();
        for key in POAM_KEYS {
            match value.get(key) {
                None | Some(Value::Null) => {},
                Some(Value::Array(items)) => {
                    for (i, item) in items.iter().enumerate() {
                        match serde_json::from_value::<PoamItem>(item.clone()) {
                            Ok(item) => poam_items.push(item),
                            Err(e) => log::warn!("Skipping POA&M item {key}[{i}]: {e}"),
                        }
                    }
                },
                Some(_) => log::warn!("Snapshot field {key} is not an array; ignored"),
            }
        }

        let text = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);

        Self {
            statuses,
            poam_items,
            exported_at: text("_exportedAt"),
            source: text("_source"),
        }
    }

    /// Status text per key; non-string entries without a `status` field read as empty
    #[must_use]
    pub fn status_map(&self) -> BTreeMap<String, String> {
        self.statuses
            .iter()
            .map(|(key, value)| {
                let status = match value {
                    Value::String(s) => s.clone(),
                    Value::Object(map) => {
                        map.get("status").and_then(Value::as_str).unwrap_or_default().to_string()
                    },
                    _ => String::new(),
                };
                (key.clone(), status)
            })
            .collect()
    }
}

/// One plan-of-action-and-milestones item exported by the assessment UI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoamItem {
    /// Item id
    pub id: String,
    /// Control the item remediates
    #[serde(alias = "control", alias = "control_id")]
    pub control_id: String,
    /// Free-text status ("open", "in progress", "closed", ...)
    pub status: String,
    /// Scheduled completion date (`YYYY-MM-DD` or RFC 3339)
    #[serde(alias = "dueDate", alias = "scheduled_completion")]
    pub scheduled_completion: Option<String>,
    /// Weakness description
    pub description: String,
}
