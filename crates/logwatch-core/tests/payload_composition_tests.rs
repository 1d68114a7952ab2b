//! Integration tests for request payload composition.

use logwatch_core::{ParseError, RetrievalMode, compose};
use serde_json::json;

#[test]
fn payload_composition_tests_merges_mode_into_existing_context() {
    let payload = compose(r#"{"a":1,"context":{"b":2}}"#, RetrievalMode::Hybrid)
        .expect("payload should compose");

    assert_eq!(
        payload,
        json!({"a": 1, "context": {"b": 2, "retrieval_mode": "hybrid"}})
    );
}

#[test]
fn payload_composition_tests_creates_context_when_absent() {
    let payload =
        compose(r#"{"request_id":"demo","logs":[]}"#, RetrievalMode::Vector).expect("compose");

    assert_eq!(payload["context"], json!({"retrieval_mode": "vector"}));
    assert_eq!(payload["request_id"], "demo");
    assert_eq!(payload["logs"], json!([]));
}

#[test]
fn payload_composition_tests_surfaces_parser_message() {
    let error = compose("{not json", RetrievalMode::Vector).expect_err("must fail");
    match error {
        ParseError::Json(message) => assert!(!message.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
}
