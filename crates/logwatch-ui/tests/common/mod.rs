//! Shared fixtures for session tests.

use logwatch_analysis_contract::{AnalysisResult, ingest};
use logwatch_ui::{Effect, Event, RequestToken, Session, reduce};

/// Response of the service to the LOW sample: no signals, no evidence.
#[allow(dead_code)]
pub const LOW_RESPONSE: &str = r#"{
    "request_id": "demo-low",
    "summary": {"risk_score": 0, "risk_level": "LOW", "decision": "ALLOW"},
    "signals": [],
    "recommended_actions": [],
    "evidence": [],
    "debug": null
}"#;

/// Response with a mix of signals, actions and evidence.
#[allow(dead_code)]
pub fn rich_result() -> AnalysisResult {
    let long_quote = "Accounts must be locked after repeated failures. ".repeat(8);
    let raw = serde_json::json!({
        "summary": {"risk_score": 55, "risk_level": "MED", "decision": "REVIEW"},
        "signals": [
            {"key": "failed_login_burst", "weight": 30, "reason": "three failures in five minutes"},
            {"key": "new_device", "weight": 10, "reason": "device not in baseline"}
        ],
        "recommended_actions": [
            {"action": "Apply CAPTCHA", "priority": "P1", "why": "slow automated guessing"}
        ],
        "evidence": [
            {"title": "Lockout Policy", "quote": long_quote, "distance": 0.3},
            {"title": "Device Policy", "quote": "Register devices.", "distance": 0.1},
            {"doc_id": "misc", "distance": null}
        ]
    });
    ingest(&raw.to_string()).expect("fixture should ingest")
}

/// Submits the session input and returns the session plus issued token.
#[allow(dead_code)]
pub fn submit(session: Session) -> (Session, RequestToken) {
    let (session, effect) = reduce(session, Event::SubmitRequested);
    match effect {
        Some(Effect::Dispatch { token, .. }) => (session, token),
        None => panic!("submission should dispatch"),
    }
}

/// Submits and applies `result` as the reply.
#[allow(dead_code)]
pub fn loaded(result: AnalysisResult) -> Session {
    let (session, token) = submit(Session::default());
    let (session, _) = reduce(
        session,
        Event::ResponseReceived {
            token,
            outcome: Ok(result),
        },
    );
    session
}
