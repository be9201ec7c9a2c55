//! Tool-call API layer
//!
//! Typed request/response structures, pure handlers, and the router that maps
//! tool names onto them. Transport-agnostic: the CLI calls it directly and
//! the `serve` loop feeds it one JSON request per line.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Not found is data**: Lookups that find nothing answer `found: false`
//! - **Errors are for bad input**: Unknown tools and malformed parameters

mod error;
mod handlers;
mod router;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT, calculate_sprs_impact, get_800_53_mapping,
    get_assessment_gaps, get_assessment_snapshot, get_control_info, get_crosswalk,
    get_evidence_requirements, get_implementation_guidance, get_new_rev3_controls,
    get_odp_values, get_poam_summary, get_sprs_score_info, list_families, search_controls,
    write_assessment_bridge,
};
pub use router::{QueryRouter, Tool, ToolInfo, ToolRequest};
pub use types::{
    ApiResponse, ControlIdRequest, ControlInfoData, ControlInfoRequest, CrosswalkData,
    CrosswalkRequest, FamiliesData, GapsData, GuidanceRequest, ImpactData, ImpactRequest, Lookup,
    NewControlsData, OdpData, PoamData, RevisionRequest, ScoreInfoData, ScoreInfoRequest,
    SearchData, SearchRequest, SearchResult, SnapshotData, SnapshotStatus, TailoringData,
    WriteBridgeData, WriteBridgeRequest,
};
