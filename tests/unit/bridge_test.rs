//! Tests for the assessment snapshot bridge through the tool surface

use chrono::TimeDelta;
use cmmc_query::core::ports::{SnapshotRead, SnapshotStore};
use serde_json::json;
use std::fs;

use crate::common::{TestRouter, noon};

fn write_param(snapshot: &serde_json::Value) -> serde_json::Value {
    json!({ "jsonData": snapshot.to_string() })
}

// =============================================================================
// WRITE
// =============================================================================

#[test]
fn test_write_then_read_round_trip() {
    let t = TestRouter::shipped();
    let snapshot = json!({ "objectiveStatus": { "3.1.1[a]": "met" }, "assessor": "J. Doe" });

    let ack = t.data("write_assessment_bridge", write_param(&snapshot));
    assert_eq!(ack["written"], true);
    assert_eq!(ack["path"], t.bridge_path().display().to_string());

    let SnapshotRead::Fresh(read) = t.bridge().read() else {
        panic!("freshly written snapshot should read as fresh");
    };
    assert_eq!(read["objectiveStatus"], snapshot["objectiveStatus"]);
    assert_eq!(read["assessor"], "J. Doe");
    assert_eq!(read["_source"], "cmmc-query");
    assert_eq!(read["_exportedAt"], ack["exportedAt"]);
}

#[test]
fn test_write_rejects_invalid_json() {
    let t = TestRouter::shipped();
    let response = t.call("write_assessment_bridge", json!({ "jsonData": "{not json" }));
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
    assert!(!t.bridge_path().exists());
}

#[test]
fn test_write_rejects_non_object() {
    let t = TestRouter::shipped();
    let response = t.call("write_assessment_bridge", json!({ "jsonData": "[1, 2, 3]" }));
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
}

#[test]
fn test_write_replaces_previous_snapshot() {
    let t = TestRouter::shipped();
    t.data("write_assessment_bridge", write_param(&json!({ "first": true })));
    t.data("write_assessment_bridge", write_param(&json!({ "second": true })));

    let SnapshotRead::Fresh(read) = t.bridge().read() else {
        panic!("expected fresh snapshot");
    };
    assert!(read.get("first").is_none());
    assert_eq!(read["second"], true);
}

// =============================================================================
// READ
// =============================================================================

#[test]
fn test_absent_snapshot() {
    let t = TestRouter::shipped();
    let data = t.data("get_assessment_snapshot", json!({}));
    assert_eq!(data["status"], "absent");
    assert!(data.get("data").is_none());
}

#[test]
fn test_exactly_one_hour_old_is_fresh() {
    let t = TestRouter::shipped();
    t.bridge().write_at(json!({ "a": 1 }), noon() - TimeDelta::hours(1)).unwrap();

    let data = t.data("get_assessment_snapshot", json!({}));
    assert_eq!(data["status"], "fresh");
    assert_eq!(data["data"]["a"], 1);
}

#[test]
fn test_one_millisecond_past_an_hour_is_stale() {
    let t = TestRouter::shipped();
    let exported = noon() - TimeDelta::hours(1) - TimeDelta::milliseconds(1);
    t.bridge().write_at(json!({ "a": 1 }), exported).unwrap();

    let data = t.data("get_assessment_snapshot", json!({}));
    assert_eq!(data["status"], "stale");
    assert_eq!(data["ageMinutes"], 60);
    assert!(data.get("data").is_none());
    assert!(data["message"].as_str().unwrap().contains("stale"));
}

#[test]
fn test_missing_timestamp_is_stale() {
    let t = TestRouter::shipped();
    fs::create_dir_all(t.bridge_path().parent().unwrap()).unwrap();
    fs::write(t.bridge_path(), r#"{ "objectiveStatus": {} }"#).unwrap();

    let data = t.data("get_assessment_snapshot", json!({}));
    assert_eq!(data["status"], "stale");
    assert!(data.get("ageMinutes").is_none());
}

#[test]
fn test_torn_file_reads_as_absent() {
    let t = TestRouter::shipped();
    fs::create_dir_all(t.bridge_path().parent().unwrap()).unwrap();
    fs::write(t.bridge_path(), r#"{ "objectiveStatus": { "3.1.1[a]": "me"#).unwrap();

    let data = t.data("get_assessment_snapshot", json!({}));
    assert_eq!(data["status"], "absent");
}

#[test]
fn test_credentials_are_redacted_on_read() {
    let t = TestRouter::shipped();
    let snapshot = json!({
        "password": "hunter2",
        "integration": {
            "apiKey": "abc",
            "refresh_token": "def",
            "tenant": "contoso",
        },
        "users": [{ "name": "alice", "clientSecret": "xyz" }],
    });
    t.bridge().write_at(snapshot, noon()).unwrap();

    let data = t.data("get_assessment_snapshot", json!({}));
    let read = &data["data"];
    assert!(read.get("password").is_none());
    assert_eq!(read["integration"], json!({ "tenant": "contoso" }));
    assert_eq!(read["users"], json!([{ "name": "alice" }]));

    // the file itself is untouched
    let on_disk = fs::read_to_string(t.bridge_path()).unwrap();
    assert!(on_disk.contains("hunter2"));
}
