//! Tool router
//!
//! Maps tool names and JSON parameters onto the pure handlers and wraps every
//! outcome in the response envelope. A call never panics and always produces
//! JSON text.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::catalog::Catalog;
use crate::core::ports::SnapshotStore;

use super::error::ApiError;
use super::handlers;
use super::types::ApiResponse;

/// Every tool the router answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Look up one control
    GetControlInfo,
    /// Keyword search
    SearchControls,
    /// Family listing
    ListFamilies,
    /// Rev 2 to Rev 3 mapping
    GetCrosswalk,
    /// DoD ODP values
    GetOdpValues,
    /// Rev 3 controls with no predecessor
    GetNewRev3Controls,
    /// 800-53 source controls and tailoring
    Get80053Mapping,
    /// Implementation guidance
    GetImplementationGuidance,
    /// Evidence checklist
    GetEvidenceRequirements,
    /// SPRS point value or methodology
    GetSprsScoreInfo,
    /// SPRS impact of not-met controls
    CalculateSprsImpact,
    /// Current assessment snapshot
    GetAssessmentSnapshot,
    /// Prioritized gaps
    GetAssessmentGaps,
    /// POA&M summary
    GetPoamSummary,
    /// Replace the assessment snapshot
    WriteAssessmentBridge,
}

impl Tool {
    /// All tools in listing order
    pub const ALL: [Self; 15] = [
        Self::GetControlInfo,
        Self::SearchControls,
        Self::ListFamilies,
        Self::GetCrosswalk,
        Self::GetOdpValues,
        Self::GetNewRev3Controls,
        Self::Get80053Mapping,
        Self::GetImplementationGuidance,
        Self::GetEvidenceRequirements,
        Self::GetSprsScoreInfo,
        Self::CalculateSprsImpact,
        Self::GetAssessmentSnapshot,
        Self::GetAssessmentGaps,
        Self::GetPoamSummary,
        Self::WriteAssessmentBridge,
    ];

    /// Wire name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetControlInfo => "get_control_info",
            Self::SearchControls => "search_controls",
            Self::ListFamilies => "list_families",
            Self::GetCrosswalk => "get_crosswalk",
            Self::GetOdpValues => "get_odp_values",
            Self::GetNewRev3Controls => "get_new_rev3_controls",
            Self::Get80053Mapping => "get_800_53_mapping",
            Self::GetImplementationGuidance => "get_implementation_guidance",
            Self::GetEvidenceRequirements => "get_evidence_requirements",
            Self::GetSprsScoreInfo => "get_sprs_score_info",
            Self::CalculateSprsImpact => "calculate_sprs_impact",
            Self::GetAssessmentSnapshot => "get_assessment_snapshot",
            Self::GetAssessmentGaps => "get_assessment_gaps",
            Self::GetPoamSummary => "get_poam_summary",
            Self::WriteAssessmentBridge => "write_assessment_bridge",
        }
    }

    /// One-line description for tool listings
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::GetControlInfo => {
                "Look up a NIST SP 800-171 control by id, with objectives and ODP values"
            },
            Self::SearchControls => "Keyword search across control ids, names, text and objectives",
            Self::ListFamilies => "List control families with control and objective counts",
            Self::GetCrosswalk => "Map a Rev 2 control to Rev 3, with ODPs and migration notes",
            Self::GetOdpValues => "DoD-defined organization-defined parameter values for a control",
            Self::GetNewRev3Controls => "List Rev 3 requirements that have no Rev 2 predecessor",
            Self::Get80053Mapping => "Source NIST SP 800-53 controls and tailoring for a control",
            Self::GetImplementationGuidance => {
                "Implementation guidance for a control, optionally filtered by technology"
            },
            Self::GetEvidenceRequirements => "Evidence an assessor expects for a control",
            Self::GetSprsScoreInfo => {
                "SPRS point value of a control, or the scoring methodology when none is given"
            },
            Self::CalculateSprsImpact => "SPRS score and severity for a set of not-met controls",
            Self::GetAssessmentSnapshot => "Current assessment snapshot, if fresh",
            Self::GetAssessmentGaps => "Prioritized gaps and estimated score from the snapshot",
            Self::GetPoamSummary => "POA&M status, overdue items and eligibility problems",
            Self::WriteAssessmentBridge => "Replace the assessment snapshot with new JSON",
        }
    }

    /// JSON schema of the parameters
    #[must_use]
    pub fn input_schema(self) -> Value {
        let revision = json!({
            "type": "string",
            "enum": ["r2", "r3"],
            "default": "r2",
            "description": "Revision of NIST SP 800-171"
        });
        let control_id = |description: &str| json!({ "type": "string", "description": description });

        let (properties, required): (Value, Vec<&str>) = match self {
            Self::GetControlInfo => (
                json!({
                    "controlId": control_id("Control id, e.g. 3.1.1 or 03.01.01"),
                    "revision": revision,
                }),
                vec!["controlId"],
            ),
            Self::SearchControls => (
                json!({
                    "query": { "type": "string", "description": "Search text" },
                    "revision": revision,
                    "maxResults": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": handlers::MAX_RESULTS_LIMIT,
                        "default": handlers::DEFAULT_MAX_RESULTS,
                    },
                }),
                vec!["query"],
            ),
            Self::ListFamilies => (json!({ "revision": revision }), vec![]),
            Self::GetCrosswalk => {
                (json!({ "rev2Id": control_id("Rev 2 control id, e.g. 3.1.1") }), vec!["rev2Id"])
            },
            Self::GetOdpValues => (
                json!({ "controlId": control_id("Rev 3 control id, e.g. 03.01.01") }),
                vec!["controlId"],
            ),
            Self::Get80053Mapping => (
                json!({ "controlId": control_id("Rev 2 control id, e.g. 3.1.1") }),
                vec!["controlId"],
            ),
            Self::GetImplementationGuidance => (
                json!({
                    "controlId": control_id("Control id in any common spelling"),
                    "technology": { "type": "string", "description": "e.g. azure, aws, m365" },
                }),
                vec!["controlId"],
            ),
            Self::GetEvidenceRequirements => {
                (json!({ "controlId": control_id("Rev 2 or Rev 3 control id") }), vec!["controlId"])
            },
            Self::GetSprsScoreInfo => {
                (json!({ "controlId": control_id("Rev 2 control id; omit for methodology") }), vec![])
            },
            Self::CalculateSprsImpact => (
                json!({
                    "notMet": {
                        "type": "string",
                        "description": "Comma-separated Rev 2 control ids that are not met"
                    }
                }),
                vec!["notMet"],
            ),
            Self::GetNewRev3Controls
            | Self::GetAssessmentSnapshot
            | Self::GetAssessmentGaps
            | Self::GetPoamSummary => (json!({}), vec![]),
            Self::WriteAssessmentBridge => (
                json!({
                    "jsonData": {
                        "type": "string",
                        "description": "Assessment snapshot as a JSON object string"
                    }
                }),
                vec!["jsonData"],
            ),
        };

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Tool {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ApiError::unknown_tool(s))
    }
}

/// Listing entry for one tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    /// Wire name
    pub name: &'static str,
    /// Description
    pub description: &'static str,
    /// Parameter schema
    pub input_schema: Value,
}

/// One line of the serve protocol
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    /// Tool name
    pub tool: String,
    /// Parameters; absent means none
    #[serde(default)]
    pub params: Value,
}

/// Routes tool calls to handlers over one catalog and one snapshot store
pub struct QueryRouter {
    catalog: Arc<Catalog>,
    store: Arc<dyn SnapshotStore>,
}

impl std::fmt::Debug for QueryRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRouter")
            .field("catalog", &self.catalog)
            .field("store", &self.store.location())
            .finish()
    }
}

fn parse<T: DeserializeOwned>(params: &Value) -> Result<T, ApiError> {
    let params = if params.is_null() { Value::Object(Map::new()) } else { params.clone() };
    serde_json::from_value(params)
        .map_err(|e| ApiError::bad_request(format!("invalid parameters: {e}")))
}

fn to_value<T: Serialize>(data: T) -> Result<Value, ApiError> {
    serde_json::to_value(data).map_err(|e| ApiError::internal(e.to_string()))
}

fn envelope<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        json!({
            "success": false,
            "error": { "code": "INTERNAL_ERROR", "message": e.to_string() }
        })
        .to_string()
    })
}

impl QueryRouter {
    /// Create a router
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn SnapshotStore>) -> Self {
        Self { catalog, store }
    }

    /// The catalog queries run against
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Listing of every tool
    #[must_use]
    pub fn tools() -> Vec<ToolInfo> {
        Tool::ALL
            .into_iter()
            .map(|tool| ToolInfo {
                name: tool.name(),
                description: tool.description(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Run a tool as of `now`, returning its data
    pub fn dispatch_at(
        &self,
        name: &str,
        params: &Value,
        now: DateTime<Utc>,
    ) -> Result<Value, ApiError> {
        let tool: Tool = name.parse()?;
        log::debug!("Dispatching {tool}");

        let catalog = self.catalog.as_ref();
        let store = self.store.as_ref();

        match tool {
            Tool::GetControlInfo => to_value(handlers::get_control_info(catalog, &parse(params)?)?),
            Tool::SearchControls => to_value(handlers::search_controls(catalog, &parse(params)?)?),
            Tool::ListFamilies => to_value(handlers::list_families(catalog, &parse(params)?)?),
            Tool::GetCrosswalk => to_value(handlers::get_crosswalk(catalog, &parse(params)?)?),
            Tool::GetOdpValues => to_value(handlers::get_odp_values(catalog, &parse(params)?)?),
            Tool::GetNewRev3Controls => to_value(handlers::get_new_rev3_controls()?),
            Tool::Get80053Mapping => {
                to_value(handlers::get_800_53_mapping(catalog, &parse(params)?)?)
            },
            Tool::GetImplementationGuidance => {
                to_value(handlers::get_implementation_guidance(catalog, &parse(params)?)?)
            },
            Tool::GetEvidenceRequirements => {
                to_value(handlers::get_evidence_requirements(catalog, &parse(params)?)?)
            },
            Tool::GetSprsScoreInfo => {
                to_value(handlers::get_sprs_score_info(catalog, &parse(params)?)?)
            },
            Tool::CalculateSprsImpact => {
                to_value(handlers::calculate_sprs_impact(catalog, &parse(params)?)?)
            },
            Tool::GetAssessmentSnapshot => to_value(handlers::get_assessment_snapshot(store, now)?),
            Tool::GetAssessmentGaps => {
                to_value(handlers::get_assessment_gaps(catalog, store, now)?)
            },
            Tool::GetPoamSummary => to_value(handlers::get_poam_summary(catalog, store, now)?),
            Tool::WriteAssessmentBridge => {
                to_value(handlers::write_assessment_bridge(store, &parse(params)?)?)
            },
        }
    }

    /// Run a tool as of `now` and render the response envelope
    #[must_use]
    pub fn call_at(&self, name: &str, params: &Value, now: DateTime<Utc>) -> String {
        match self.dispatch_at(name, params, now) {
            Ok(data) => envelope(&ApiResponse::success(data)),
            Err(err) => {
                log::warn!("Tool {name} failed: {err}");
                envelope(&ApiResponse::error(&err))
            },
        }
    }

    /// Run a tool and render the response envelope
    #[must_use]
    pub fn call(&self, name: &str, params: &Value) -> String {
        self.call_at(name, params, Utc::now())
    }

    /// Answer one serve-protocol line with one envelope line
    #[must_use]
    pub fn handle_line(&self, line: &str) -> String {
        match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) => self.call(&request.tool, &request.params),
            Err(e) => {
                let err = ApiError::bad_request(format!("invalid request line: {e}"));
                log::warn!("{err}");
                envelope(&ApiResponse::error(&err))
            },
        }
    }
}
