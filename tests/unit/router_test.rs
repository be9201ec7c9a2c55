//! Tests for tool dispatch and the response envelope

use std::collections::BTreeSet;

use cmmc_query::api::{ApiError, QueryRouter, Tool};
use serde_json::{Value, json};

use crate::common::TestRouter;

#[test]
fn test_tool_listing() {
    let tools = QueryRouter::tools();
    assert_eq!(tools.len(), 15);

    let names: BTreeSet<&str> = tools.iter().map(|t| t.name).collect();
    assert_eq!(names.len(), 15);
    for tool in &tools {
        assert_eq!(tool.input_schema["type"], "object", "{} schema", tool.name);
        assert!(!tool.description.is_empty());
    }

    let listed = serde_json::to_value(&tools[0]).unwrap();
    assert!(listed.get("inputSchema").is_some());
}

#[test]
fn test_tool_names_round_trip() {
    for tool in Tool::ALL {
        assert_eq!(tool.to_string().parse::<Tool>().unwrap(), tool);
    }
    assert!("get_everything".parse::<Tool>().is_err());
}

#[test]
fn test_unknown_tool() {
    let t = TestRouter::shipped();
    let response = t.call("get_everything", json!({}));
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["code"], "UNKNOWN_TOOL");
    assert!(response["error"]["message"].as_str().unwrap().contains("get_everything"));
    assert!(response.get("data").is_none());
}

#[test]
fn test_wrong_param_type_is_bad_request() {
    let t = TestRouter::shipped();
    let response = t.call("get_control_info", json!({ "controlId": 311 }));
    assert_eq!(response["error"]["code"], "BAD_REQUEST");

    let response = t.call("get_control_info", json!({}));
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
}

#[test]
fn test_invalid_revision_is_bad_request() {
    let t = TestRouter::shipped();
    let response = t.call("list_families", json!({ "revision": "r4" }));
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
    assert!(response["error"]["message"].as_str().unwrap().contains("r4"));
}

#[test]
fn test_null_params_read_as_empty() {
    let t = TestRouter::shipped();
    let data = t.data("list_families", Value::Null);
    assert_eq!(data["revision"], "r2");
}

#[test]
fn test_not_found_is_success() {
    let t = TestRouter::shipped();
    let data = t.data("get_control_info", json!({ "controlId": "9.9.9" }));
    assert_eq!(data["found"], false);
    assert!(data["message"].as_str().unwrap().contains("9.9.9"));
}

#[test]
fn test_handle_line() {
    let t = TestRouter::shipped();

    let line = r#"{"tool":"get_sprs_score_info","params":{"controlId":"3.1.1"}}"#;
    let response: Value = serde_json::from_str(&t.router.handle_line(line)).unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["points"], 5);

    // params may be omitted
    let response: Value =
        serde_json::from_str(&t.router.handle_line(r#"{"tool":"list_families"}"#)).unwrap();
    assert_eq!(response["success"], true);

    let response: Value = serde_json::from_str(&t.router.handle_line("not json")).unwrap();
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
}

#[test]
fn test_envelope_is_single_line() {
    let t = TestRouter::shipped();
    let text = t.router.call("get_control_info", &json!({ "controlId": "3.1.1" }));
    assert!(!text.contains('\n'));
}

#[test]
fn test_error_display_carries_code() {
    let err = ApiError::unknown_tool("frobnicate");
    assert_eq!(err.to_string(), "UNKNOWN_TOOL: Unknown tool 'frobnicate'");
    assert!(ApiError::bad_request("nope").to_string().starts_with("BAD_REQUEST"));
}
