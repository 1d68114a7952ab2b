//! Validates contract fixtures against frozen JSON schemas.

use jsonschema::JSONSchema;
use logwatch_analysis_contract::{Decision, RiskLevel, ingest};
use logwatch_core::{RetrievalMode, Sample, compose};
use serde_json::Value;

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

fn request_validator() -> JSONSchema {
    compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analyze-request.schema.json"
    ))
}

fn response_validator() -> JSONSchema {
    compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analysis-response.schema.json"
    ))
}

#[test]
fn request_fixture_matches_schema() {
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/analyze-request.valid.json"
    ));
    assert!(
        request_validator().is_valid(&fixture),
        "request fixture should validate against schema"
    );
}

#[test]
fn composed_samples_match_request_schema() {
    let validator = request_validator();
    for sample in [Sample::Low, Sample::Med, Sample::High] {
        for mode in [RetrievalMode::Vector, RetrievalMode::Hybrid] {
            let payload = compose(sample.text(), mode).expect("sample should compose");
            assert!(
                validator.is_valid(&payload),
                "{sample} composed in {mode} mode should validate"
            );
        }
    }
}

#[test]
fn uncomposed_sample_lacks_retrieval_mode() {
    let raw: Value = serde_json::from_str(Sample::Low.text()).expect("sample should be JSON");
    assert!(
        !request_validator().is_valid(&raw),
        "requests without context.retrieval_mode should be rejected"
    );
}

#[test]
fn analysis_fixture_matches_schema() {
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/analysis-response.valid.json"
    ));
    assert!(
        response_validator().is_valid(&fixture),
        "analysis fixture should validate against schema"
    );
}

#[test]
fn analysis_fixture_ingests_completely() {
    let raw = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/analysis-response.valid.json"
    ))
    .expect("fixture should be readable");

    let result = ingest(&raw).expect("fixture should ingest");
    let summary = result.summary.as_ref().expect("summary should be present");
    assert_eq!(summary.risk_level, Some(RiskLevel::High));
    assert_eq!(summary.decision, Some(Decision::Escalate));
    assert_eq!(result.signals.len(), 2);
    assert_eq!(result.actions.len(), 2);
    assert_eq!(result.evidence.len(), 2);
    assert_eq!(result.evidence[1].quote, None);
    assert!(result.debug.is_some());
}
