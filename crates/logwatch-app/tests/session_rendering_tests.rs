//! Integration tests for text rendering of session views.

use logwatch_analysis_contract::ingest;
use logwatch_app::render_session;
use logwatch_ui::{Category, Effect, Event, Session, View, reduce};
use serde_json::json;

fn loaded(body: serde_json::Value) -> Session {
    let (session, effect) = reduce(Session::default(), Event::SubmitRequested);
    let Some(Effect::Dispatch { token, .. }) = effect else {
        panic!("default sample should dispatch");
    };
    let result = ingest(&body.to_string()).expect("fixture should ingest");
    reduce(
        session,
        Event::ResponseReceived {
            token,
            outcome: Ok(result),
        },
    )
    .0
}

fn select(session: Session, event: Event) -> Session {
    reduce(session, event).0
}

#[test]
fn session_rendering_tests_overview_shows_badge_and_counts() {
    let session = loaded(json!({
        "request_id": "r-1",
        "summary": {"risk_score": 82, "risk_level": "HIGH", "decision": "ESCALATE"},
        "signals": [{"key": "impossible_travel", "weight": 40}],
        "evidence": [{"title": "Travel Policy", "distance": 0.05}]
    }));

    let text = render_session(&session);
    assert!(text.contains("risk: [danger] HIGH  score: 82  decision: ESCALATE"));
    assert!(text.contains("request: r-1"));
    assert!(text.contains("sections: signals 1 | actions 0 | evidence 1"));
}

#[test]
fn session_rendering_tests_missing_summary_renders_unknown() {
    let session = loaded(json!({}));
    let text = render_session(&session);
    assert!(text.contains("risk: [neutral] UNKNOWN  score: -  decision: -"));
}

#[test]
fn session_rendering_tests_signals_view_lists_signals_and_actions() {
    let session = loaded(json!({
        "signals": [
            {"key": "failed_login_burst", "weight": 30, "reason": "three failures"},
            {"weight": 5}
        ],
        "recommended_actions": [{"action": "Enable MFA", "priority": "p0", "why": "stuffing"}]
    }));
    let session = select(session, Event::ViewSelected(View::Signals));

    let text = render_session(&session);
    assert!(text.contains("signals (2 of 2)"));
    assert!(text.contains("[warn] failed_login_burst  weight 30"));
    assert!(text.contains("signal-1  weight 5"));
    assert!(text.contains("[danger] p0 Enable MFA"));

    let session = select(session, Event::QueryChanged(Category::Signals, "BURST".to_string()));
    let text = render_session(&session);
    assert!(text.contains("signals (1 of 2)  query: \"BURST\""));
    assert!(!text.contains("signal-1"));
}

#[test]
fn session_rendering_tests_long_quote_collapses_until_toggled() {
    let quote = "x".repeat(300);
    let session = loaded(json!({
        "evidence": [
            {"title": "Lockout Policy", "section": "2.1", "quote": quote, "distance": 0.25},
            {"doc_id": "misc"}
        ]
    }));
    let session = select(session, Event::ViewSelected(View::Evidence));

    let text = render_session(&session);
    let preview = format!("\"{}…\"", "x".repeat(220));
    assert!(text.contains(&preview));
    assert!(text.contains("(toggle 0 to expand)"));
    assert!(text.contains("#0 Lockout Policy  distance 0.2500"));
    assert!(text.contains("section: 2.1 | page: - | chunk_id: -"));
    assert!(text.contains("#1 misc  distance -"));
    assert!(text.contains("(no quote)"));

    let session = select(session, Event::QuoteToggled(0));
    let text = render_session(&session);
    assert!(text.contains(&format!("\"{quote}\"")));
    assert!(text.contains("(toggle 0 to collapse)"));
}

#[test]
fn session_rendering_tests_empty_evidence_explains_guardrail() {
    let session = loaded(json!({"evidence": []}));
    let session = select(session, Event::ViewSelected(View::Evidence));

    let text = render_session(&session);
    assert!(text.contains("evidence (0 of 0)"));
    assert!(text.contains("guardrail"));
}
