//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use hidemoreless_lib::command::{execute_json, execute_json_batch};
use hidemoreless_lib::fixtures::nested_scene;
use hidemoreless_lib::harness::TestHarness;

fn loaded() -> TestHarness {
    let mut h = TestHarness::new();
    h.load_scene(nested_scene());
    h
}

#[test]
fn test_command_load_scene() {
    let mut h = TestHarness::new();
    let scene = serde_json::to_value(nested_scene()).unwrap();
    let json = serde_json::json!({ "command": "load_scene", "scene": scene }).to_string();

    let resp = execute_json(&mut h, &json).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["document"], 1);
    assert_eq!(h.document_count(), 1);
}

#[test]
fn test_command_load_invalid_scene() {
    let mut h = TestHarness::new();
    let mut scene = nested_scene();
    scene.root.push("missing".to_string());
    let json = serde_json::json!({ "command": "load_scene", "scene": scene }).to_string();

    let resp = execute_json(&mut h, &json).unwrap();
    assert!(!resp.success);
    assert_eq!(h.document_count(), 0);
}

#[test]
fn test_command_inspect() {
    let mut h = loaded();
    execute_json(&mut h, r#"{"command": "open_path", "ids": ["A", "B"]}"#).unwrap();
    execute_json(&mut h, r#"{"command": "hide_more"}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["active_path"], serde_json::json!(["A", "B"]));
    assert_eq!(data["depth"], serde_json::json!({ "level": 0 }));
    assert_eq!(data["hidden_by_hider"], 2);
    assert_eq!(data["status"], "HideMore: Depth 0");
}

#[test]
fn test_command_batch_session() {
    let mut h = loaded();
    let batch = r#"[
        {"command": "open_path", "ids": ["A", "B", "C"]},
        {"command": "hide_more"},
        {"command": "hide_more"},
        {"command": "save"},
        {"command": "inspect"},
        {"command": "hide_less"},
        {"command": "hide_less"},
        {"command": "hide_less"}
    ]"#;

    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert_eq!(responses.len(), 8);
    assert!(responses.iter().all(|r| r.success));

    let inspect = responses[4].data.as_ref().unwrap();
    assert_eq!(inspect["depth"], serde_json::json!({ "level": 1 }));
    assert_eq!(inspect["status"], "HideMoreLess: reapplied depth 1 after Save");

    let last = responses[7].data.as_ref().unwrap();
    assert_eq!(last["status"]["status"], "nothing_hidden");
    assert_eq!(h.hidden(), ["Q"]);
}

#[test]
fn test_command_close_and_reload() {
    let mut h = loaded();
    let batch = r#"[
        {"command": "open_path", "ids": ["A", "B"]},
        {"command": "hide_more"},
        {"command": "close"},
        {"command": "reload"}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert_eq!(responses[2].data.as_ref().unwrap()["closed"], "B");
    assert!(responses[3].success);
    assert!(h.tracker.is_empty());
}

#[test]
fn test_command_undo_redo() {
    let mut h = loaded();
    h.open_path(&["A", "B"]).unwrap();
    execute_json(&mut h, r#"{"command": "hide_more"}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["undone"], true);
    assert!(!h.is_hidden("X"));

    let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["redone"], true);
    assert!(h.is_hidden("X"));
}

#[test]
fn test_command_activate_unknown_document() {
    let mut h = loaded();
    let resp = execute_json(&mut h, r#"{"command": "activate", "document": 42}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("42"));
}

#[test]
fn test_command_invalid_batch() {
    let mut h = loaded();
    assert!(execute_json_batch(&mut h, r#"{"command": "save"}"#).is_err());
}
