//! Plain-text rendering of session views for the terminal explorer.

use logwatch_analysis_contract::{
    AnalysisResult, PLACEHOLDER, Tone, format_distance, format_number, risk_label, risk_tone,
};
use logwatch_core::RetrievalMode;
use logwatch_explorer::QuoteView;
use logwatch_ui::{Session, View};
use url::Url;

use crate::app_version;

/// Shown when a result carries no evidence at all.
const EMPTY_EVIDENCE: &str = "no evidence returned. Without supporting evidence the service \
guardrail may withhold an ESCALATE decision.";

/// Startup banner with version, endpoint and retrieval mode.
pub fn render_banner(endpoint: &Url, mode: RetrievalMode) -> String {
    format!(
        "logwatch {} | endpoint {endpoint} | mode {mode}\ntype 'help' for commands",
        app_version()
    )
}

/// Renders the current view of `session`.
pub fn render_session(session: &Session) -> String {
    let mut lines = vec![format!(
        "== {} ==  mode: {}",
        session.view(),
        session.retrieval_mode()
    )];

    if let Some(token) = session.pending() {
        lines.push(format!("submitting {token}..."));
    }
    if let Some(error) = session.error() {
        lines.push(format!("error: {error}"));
    }

    match (session.view(), session.result()) {
        (_, None) => {
            if session.error().is_none() && !session.is_pending() {
                lines.push("no result yet; 'submit' analyzes the current input".to_string());
            }
        }
        (View::Overview, Some(result)) => render_overview(session, result, &mut lines),
        (View::Signals, Some(_)) => render_signals(session, &mut lines),
        (View::Evidence, Some(result)) => render_evidence(session, result, &mut lines),
    }

    lines.join("\n")
}

fn render_overview(session: &Session, result: &AnalysisResult, lines: &mut Vec<String>) {
    let level = result.risk_level();
    let summary = result.summary.clone().unwrap_or_default();
    lines.push(format!(
        "risk: {} {}  score: {}  decision: {}",
        tag(risk_tone(level)),
        risk_label(level),
        summary.score_text(),
        summary.decision.map_or(PLACEHOLDER, |decision| decision.as_str()),
    ));
    if let Some(request_id) = &result.request_id {
        lines.push(format!("request: {request_id}"));
    }
    let counts = session.section_counts();
    lines.push(format!(
        "sections: signals {} | actions {} | evidence {}",
        counts.signals, counts.actions, counts.evidence
    ));
}

fn render_signals(session: &Session, lines: &mut Vec<String>) {
    let counts = session.section_counts();
    let filters = session.filters();

    let signals = session.visible_signals();
    lines.push(format!(
        "signals ({} of {}){}",
        signals.len(),
        counts.signals,
        query_suffix(&filters.signals)
    ));
    if signals.is_empty() {
        lines.push(format!("  {}", empty_text(counts.signals)));
    }
    for entry in signals {
        let mut line = format!(
            "  {} {}  weight {}",
            tag(entry.tone()),
            entry.label(entry.index),
            format_number(entry.weight)
        );
        if let Some(value) = &entry.value {
            line.push_str(&format!("  value {value}"));
        }
        lines.push(line);
        lines.push(format!("      {}", entry.reason.as_deref().unwrap_or(PLACEHOLDER)));
    }

    let actions = session.visible_actions();
    lines.push(format!(
        "actions ({} of {}){}",
        actions.len(),
        counts.actions,
        query_suffix(&filters.actions)
    ));
    if actions.is_empty() {
        lines.push(format!("  {}", empty_text(counts.actions)));
    }
    for entry in actions {
        lines.push(format!(
            "  {} {} {}",
            tag(entry.tone()),
            entry.priority.as_deref().unwrap_or(PLACEHOLDER),
            entry.label(entry.index)
        ));
        lines.push(format!("      {}", entry.why.as_deref().unwrap_or(PLACEHOLDER)));
    }
}

fn render_evidence(session: &Session, result: &AnalysisResult, lines: &mut Vec<String>) {
    let filter = &session.filters().evidence;
    let evidence = session.visible_evidence();
    lines.push(format!(
        "evidence ({} of {}){}  only quoted: {}  sort: {}",
        evidence.len(),
        result.evidence.len(),
        query_suffix(&filter.query),
        if filter.only_quoted { "on" } else { "off" },
        filter.sort
    ));

    if result.evidence.is_empty() {
        lines.push(format!("  {EMPTY_EVIDENCE}"));
        return;
    }
    if evidence.is_empty() {
        lines.push(format!("  {}", empty_text(result.evidence.len())));
    }

    for entry in evidence {
        lines.push(format!(
            "  #{} {}  distance {}",
            entry.index,
            entry.label(entry.index),
            format_distance(entry.distance)
        ));
        lines.push(format!("      {}", entry.locator()));
        match session.quote_view(entry.index) {
            QuoteView::Missing => lines.push("      (no quote)".to_string()),
            QuoteView::Full(quote) => lines.push(format!("      \"{quote}\"")),
            QuoteView::Collapsed(preview) => {
                lines.push(format!("      \"{preview}\""));
                lines.push(format!("      (toggle {} to expand)", entry.index));
            }
            QuoteView::Expanded(quote) => {
                lines.push(format!("      \"{quote}\""));
                lines.push(format!("      (toggle {} to collapse)", entry.index));
            }
        }
    }
}

fn tag(tone: Tone) -> String {
    format!("[{}]", tone.as_str())
}

fn query_suffix(query: &str) -> String {
    if query.trim().is_empty() {
        String::new()
    } else {
        format!("  query: \"{}\"", query.trim())
    }
}

fn empty_text(total: usize) -> &'static str {
    if total == 0 {
        "none returned"
    } else {
        "nothing matches the current filters"
    }
}
