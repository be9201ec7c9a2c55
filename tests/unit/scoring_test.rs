//! Tests for SPRS score information and impact calculation

use cmmc_query::core::services::{MAX_SCORE, MIN_SCORE, ScoreEngine, SeverityBand};
use serde_json::json;
use test_case::test_case;

use crate::common::TestRouter;

// =============================================================================
// SCORE INFO
// =============================================================================

#[test]
fn test_score_info_for_never_deferrable_control() {
    let t = TestRouter::shipped();
    let data = t.data("get_sprs_score_info", json!({ "controlId": "3.5.3" }));
    assert_eq!(data["found"], true);
    assert_eq!(data["points"], 5);
    assert_eq!(data["neverDeferrable"], true);
    assert_eq!(data["classification"], "must be fully implemented");
}

#[test]
fn test_score_info_unscored_control() {
    let t = TestRouter::shipped();
    let data = t.data("get_sprs_score_info", json!({ "controlId": "3.12.4" }));
    assert_eq!(data["found"], false);
}

#[test]
fn test_methodology_when_no_control_given() {
    let t = TestRouter::shipped();
    let data = t.data("get_sprs_score_info", json!({}));
    assert_eq!(data["maxScore"], MAX_SCORE);
    assert_eq!(data["minScore"], MIN_SCORE);
    assert_eq!(data["conditionalThreshold"], 88);
    assert_eq!(data["scoredControls"], 109);
    assert_eq!(data["fivePoint"], 44);
    assert_eq!(data["threePoint"], 14);
    assert_eq!(data["onePoint"], 51);
    assert_eq!(data["neverDeferrable"].as_array().unwrap().len(), 7);
}

#[test]
fn test_table_total_spans_score_range() {
    let engine = ScoreEngine::new();
    let methodology = engine.methodology();
    let total = methodology.five_point * 5 + methodology.three_point * 3 + methodology.one_point;
    assert_eq!(i32::try_from(total).unwrap(), MAX_SCORE - MIN_SCORE);
}

// =============================================================================
// IMPACT
// =============================================================================

#[test]
fn test_impact_with_mfa_gap() {
    let t = TestRouter::shipped();
    let data = t.data("calculate_sprs_impact", json!({ "notMet": "3.5.3, 3.1.1" }));
    assert_eq!(data["score"], 100);
    assert_eq!(data["deduction"], 10);
    assert_eq!(data["severity"], "minor");
    assert_eq!(data["maxScore"], 110);
    assert_eq!(data["blockers"], json!(["3.5.3"]));
    assert!(data["warning"].as_str().unwrap().contains("3.5.3"));
}

#[test]
fn test_impact_without_blockers_has_no_warning() {
    let t = TestRouter::shipped();
    let data = t.data("calculate_sprs_impact", json!({ "notMet": "3.1.1" }));
    assert_eq!(data["score"], 105);
    assert!(data.get("warning").is_none());
}

#[test]
fn test_impact_reports_unknown_ids() {
    let t = TestRouter::shipped();
    let data = t.data("calculate_sprs_impact", json!({ "notMet": "3.1.1,9.9.9,,3.12.4" }));
    assert_eq!(data["deduction"], 5);
    assert_eq!(data["unknownIds"], json!(["3.12.4", "9.9.9"]));
}

#[test]
fn test_impact_empty_list_is_exact_pass() {
    let t = TestRouter::shipped();
    let data = t.data("calculate_sprs_impact", json!({ "notMet": "" }));
    assert_eq!(data["score"], 110);
    assert_eq!(data["severity"], "exact_pass");
}

#[test]
fn test_everything_not_met_reaches_floor() {
    let engine = ScoreEngine::new();
    let all: Vec<&str> = cmmc_query::core::services::score::POINT_TABLE
        .iter()
        .map(|(id, _)| *id)
        .collect();
    let impact = engine.compute_impact(&all);
    assert_eq!(impact.score, MIN_SCORE);
    assert_eq!(impact.severity, SeverityBand::Critical);
    assert_eq!(impact.blockers.len(), 7);
}

#[test]
fn test_impact_requires_not_met() {
    let t = TestRouter::shipped();
    let response = t.call("calculate_sprs_impact", json!({}));
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// SEVERITY BANDS
// =============================================================================

#[test_case(0, SeverityBand::ExactPass ; "nothing deducted")]
#[test_case(1, SeverityBand::Minor ; "one point")]
#[test_case(10, SeverityBand::Minor ; "top of minor")]
#[test_case(11, SeverityBand::Moderate ; "bottom of moderate")]
#[test_case(30, SeverityBand::Moderate ; "top of moderate")]
#[test_case(31, SeverityBand::Significant ; "bottom of significant")]
#[test_case(60, SeverityBand::Significant ; "top of significant")]
#[test_case(61, SeverityBand::Critical ; "bottom of critical")]
#[test_case(313, SeverityBand::Critical ; "everything")]
fn test_severity_band(deduction: u32, expected: SeverityBand) {
    assert_eq!(SeverityBand::for_deduction(deduction), expected);
}
