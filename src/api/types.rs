//! API request and response types
//!
//! Requests use the camelCase parameter names of the tool surface. Responses
//! borrow from the catalog where they can; they are serialized immediately.

use serde::{Deserialize, Serialize};

use crate::core::models::{CrosswalkEntry, OdpParameter, Revision, TailoringRecord};
use crate::core::services::{
    FamilySummary, GapReport, IndexStats, IndexedControl, Methodology, NewControlInfo, OdpSource,
    PoamSummary, ScoreImpact, ScoreInfo,
};

use super::error::{ApiError, ApiErrorData};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(err: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.into()),
        }
    }
}

/// A lookup that may legitimately find nothing
#[derive(Debug, Serialize)]
pub struct Lookup<T> {
    /// Whether a record was found
    pub found: bool,
    /// The record
    #[serde(flatten)]
    pub result: Option<T>,
    /// Explanation when nothing was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Lookup<T> {
    /// A found record
    #[must_use]
    pub const fn found(result: T) -> Self {
        Self {
            found: true,
            result: Some(result),
            message: None,
        }
    }

    /// Nothing found, with an explanation
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            found: false,
            result: None,
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Parameters naming one control, with an optional revision
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlInfoRequest {
    /// Control id
    pub control_id: String,
    /// Revision (`r2` or `r3`); defaults to r2
    #[serde(default)]
    pub revision: Option<String>,
}

/// Parameters for keyword search
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Search text
    pub query: String,
    /// Revision; defaults to r2
    #[serde(default)]
    pub revision: Option<String>,
    /// Maximum results; defaults to 10
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// Parameters naming only a revision
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRequest {
    /// Revision; defaults to r2
    #[serde(default)]
    pub revision: Option<String>,
}

/// Parameters for a crosswalk lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswalkRequest {
    /// Rev 2 control id
    #[serde(alias = "controlId")]
    pub rev2_id: String,
}

/// Parameters naming one control
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlIdRequest {
    /// Control id
    pub control_id: String,
}

/// Parameters for a guidance lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceRequest {
    /// Control id in any spelling
    pub control_id: String,
    /// Optional technology filter
    #[serde(default)]
    pub technology: Option<String>,
}

/// Parameters for score information
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInfoRequest {
    /// Control id; omitted for the methodology overview
    #[serde(default)]
    pub control_id: Option<String>,
}

/// Parameters for an impact calculation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
    /// Comma-separated not-met control ids
    pub not_met: String,
}

/// Parameters for writing the snapshot
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBridgeRequest {
    /// Snapshot as JSON text
    pub json_data: String,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// ODP values for a control
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OdpData<'a> {
    /// Control id
    pub control_id: String,
    /// Table that answered
    pub source: OdpSource,
    /// Human title
    pub title: &'a str,
    /// Related controls
    pub related: &'a [String],
    /// Parameters in authored order
    pub parameters: &'a [OdpParameter],
}

/// Control detail
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlInfoData<'a> {
    /// Revision searched
    pub revision: Revision,
    /// The control
    #[serde(flatten)]
    pub control: &'a IndexedControl,
    /// Number of objectives
    pub objective_count: usize,
    /// ODP values, when the control has any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odp: Option<OdpData<'a>>,
}

/// One search result
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
    /// Relevance score
    pub score: u32,
    /// Control id
    pub control_id: &'a str,
    /// Control name
    pub control_name: &'a str,
    /// Family name
    pub family_name: &'a str,
    /// Requirement text
    pub description: &'a str,
}

/// Search response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData<'a> {
    /// The query as given
    pub query: String,
    /// Revision searched
    pub revision: Revision,
    /// Number of results returned
    pub total: usize,
    /// Results, best first
    pub results: Vec<SearchResult<'a>>,
}

/// Family listing
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamiliesData<'a> {
    /// Revision listed
    pub revision: Revision,
    /// Totals
    pub stats: IndexStats,
    /// Families in authored order
    pub families: &'a [FamilySummary],
}

/// Crosswalk response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswalkData<'a> {
    /// Rev 2 id
    pub rev2_id: String,
    /// The mapping
    pub mapping: &'a CrosswalkEntry,
    /// ODP values of the Rev 3 target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odp: Option<OdpData<'a>>,
    /// Migration notes
    pub migration_notes: Vec<String>,
}

/// New Rev 3 controls
#[derive(Debug, Serialize)]
pub struct NewControlsData {
    /// Count
    pub total: usize,
    /// Controls in id order
    pub controls: Vec<NewControlInfo>,
}

/// 800-53 tailoring response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoringData<'a> {
    /// Control id
    pub control_id: String,
    /// The record
    #[serde(flatten)]
    pub record: &'a TailoringRecord,
}

/// Score information: one control, or the methodology when none was named
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScoreInfoData {
    /// Lookup of one control
    Control(Lookup<ScoreInfo>),
    /// Methodology overview
    Methodology(Methodology),
}

/// Impact calculation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactData {
    /// The computed impact
    #[serde(flatten)]
    pub impact: ScoreImpact,
    /// Baseline the score started from
    pub max_score: i32,
    /// Warning when never-deferrable controls are present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Freshness of the snapshot a response was based on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotStatus {
    /// Fresh snapshot used
    Fresh,
    /// Snapshot too old
    Stale,
    /// No snapshot
    Absent,
}

/// Snapshot-derived response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData<T> {
    /// Freshness
    pub status: SnapshotStatus,
    /// Payload when fresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Age in minutes when stale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_minutes: Option<i64>,
    /// Export timestamp when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    /// Explanation when not fresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Gap analysis response
pub type GapsData = SnapshotData<GapReport>;

/// POA&M response
pub type PoamData = SnapshotData<PoamSummary>;

/// Snapshot write acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBridgeData {
    /// Always true; failures are reported as errors
    pub written: bool,
    /// Where the snapshot went
    pub path: String,
    /// Stamped export time
    pub exported_at: String,
}
