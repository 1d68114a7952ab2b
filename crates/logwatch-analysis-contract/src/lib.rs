#![warn(missing_docs)]
//! # logwatch-analysis-contract
//!
//! ## Purpose
//! Defines the analysis service response model and the presentation values
//! derived from it.
//!
//! ## Responsibilities
//! - Ingest raw response bodies into an owned [`AnalysisResult`].
//! - Degrade missing or wrongly-typed fields to absent values instead of failing.
//! - Derive badge/chip tones and placeholder labels on demand.
//! - Classify HTTP replies into results or [`ExchangeError`].
//!
//! ## Data flow
//! HTTP status + body -> [`ingest_reply`] -> [`ingest`] -> [`AnalysisResult`]
//! -> explorer pipelines and session state.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs so results outlive transient network
//! buffers and can cross the worker-thread boundary.
//!
//! ## Error model
//! Only a body that is not JSON at all fails, with
//! [`IngestError::MalformedBody`]. Everything else degrades to "no data".
//!
//! ## Notes
//! The optional `debug` section is carried through untouched and never
//! interpreted here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Text used wherever a scalar field is absent.
pub const PLACEHOLDER: &str = "-";

/// Sentinel distance for evidence without a numeric distance.
pub const MISSING_DISTANCE: f64 = 999.0;

/// Signal weight at or above which a signal is rendered as danger.
pub const DANGER_WEIGHT: f64 = 35.0;

/// Signal weight at or above which a signal is rendered as warn.
pub const WARN_WEIGHT: f64 = 20.0;

/// Normalized analysis result. Immutable once ingested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    /// Request identifier echoed by the service.
    pub request_id: Option<String>,
    /// Score/level/decision summary.
    pub summary: Option<Summary>,
    /// Risk signals in service order.
    pub signals: Vec<Signal>,
    /// Recommended actions in service order.
    pub actions: Vec<ActionItem>,
    /// Supporting evidence in service order.
    pub evidence: Vec<Evidence>,
    /// Opaque diagnostics section.
    pub debug: Option<Value>,
}

impl AnalysisResult {
    /// Returns `(signals, actions, evidence)` item counts.
    pub fn section_counts(&self) -> SectionCounts {
        SectionCounts {
            signals: self.signals.len(),
            actions: self.actions.len(),
            evidence: self.evidence.len(),
        }
    }

    /// Risk level from the summary, if any.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.summary.as_ref().and_then(|summary| summary.risk_level)
    }
}

/// Per-section item counts shown on the overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCounts {
    /// Number of signals.
    pub signals: usize,
    /// Number of recommended actions.
    pub actions: usize,
    /// Number of evidence items.
    pub evidence: usize,
}

/// Result summary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    /// Aggregate risk score.
    #[serde(default, deserialize_with = "lenient")]
    pub risk_score: Option<f64>,
    /// Risk level bucket.
    #[serde(default, deserialize_with = "lenient")]
    pub risk_level: Option<RiskLevel>,
    /// Recommended decision.
    #[serde(default, deserialize_with = "lenient")]
    pub decision: Option<Decision>,
}

impl Summary {
    /// Score text, integral scores without a fraction.
    pub fn score_text(&self) -> String {
        format_number(self.risk_score)
    }
}

/// Risk level bucket reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RiskLevel {
    /// Low risk.
    #[serde(rename = "LOW")]
    Low,
    /// Medium risk.
    #[serde(rename = "MED", alias = "MEDIUM")]
    Med,
    /// High risk.
    #[serde(rename = "HIGH")]
    High,
}

impl RiskLevel {
    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }
}

/// Decision recommended by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Decision {
    /// No action needed.
    #[serde(rename = "ALLOW")]
    Allow,
    /// Human review suggested.
    #[serde(rename = "REVIEW")]
    Review,
    /// Escalation required.
    #[serde(rename = "ESCALATE")]
    Escalate,
}

impl Decision {
    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Review => "REVIEW",
            Self::Escalate => "ESCALATE",
        }
    }
}

/// Named risk indicator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Signal {
    /// Rule identifier, for example `failed_login_burst`.
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    /// Observed value; shape depends on the rule.
    #[serde(default)]
    pub value: Option<Value>,
    /// Score contribution.
    #[serde(default, deserialize_with = "lenient")]
    pub weight: Option<f64>,
    /// Human-readable explanation.
    #[serde(default, deserialize_with = "lenient")]
    pub reason: Option<String>,
}

impl Signal {
    /// Display label: `key`, else `signal-{index}`.
    pub fn label(&self, index: usize) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| format!("signal-{index}"))
    }

    /// Tone derived from the weight.
    pub fn tone(&self) -> Tone {
        severity_tone(self.weight)
    }
}

/// Recommended remediation step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionItem {
    /// Action text.
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    /// Priority tag such as `P0`.
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<String>,
    /// Rationale.
    #[serde(default, deserialize_with = "lenient")]
    pub why: Option<String>,
}

impl ActionItem {
    /// Display label: `action`, else `action-{index}`.
    pub fn label(&self, index: usize) -> String {
        self.action
            .clone()
            .unwrap_or_else(|| format!("action-{index}"))
    }

    /// Tone derived from the priority tag.
    pub fn tone(&self) -> Tone {
        priority_tone(self.priority.as_deref())
    }
}

/// Retrieved document snippet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Evidence {
    /// Document title.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Document identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub doc_id: Option<String>,
    /// Section heading.
    #[serde(default, deserialize_with = "lenient")]
    pub section: Option<String>,
    /// Page number.
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<u64>,
    /// Chunk identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub chunk_id: Option<String>,
    /// Snippet text.
    #[serde(default, deserialize_with = "lenient")]
    pub quote: Option<String>,
    /// Vector distance; lower is closer.
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<f64>,
    /// Relevance in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient")]
    pub relevance: Option<f64>,
}

impl Evidence {
    /// Display label: `title`, else `doc_id`, else `doc-{index}`.
    pub fn label(&self, index: usize) -> String {
        self.title
            .as_deref()
            .or(self.doc_id.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("doc-{index}"))
    }

    /// Key used by title ordering: `title`, else `doc_id`, else empty.
    pub fn sort_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.doc_id.as_deref())
            .unwrap_or("")
    }

    /// Distance used by distance ordering.
    pub fn sort_distance(&self) -> f64 {
        self.distance.unwrap_or(MISSING_DISTANCE)
    }

    /// Returns `true` when the quote has non-whitespace content.
    pub fn has_quote(&self) -> bool {
        self.quote
            .as_deref()
            .is_some_and(|quote| !quote.trim().is_empty())
    }

    /// `section: … | page: … | chunk_id: …` locator line.
    pub fn locator(&self) -> String {
        let page = self
            .page
            .map(|page| page.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        format!(
            "section: {} | page: {} | chunk_id: {}",
            self.section.as_deref().unwrap_or(PLACEHOLDER),
            page,
            self.chunk_id.as_deref().unwrap_or(PLACEHOLDER),
        )
    }
}

/// Presentation tone shared by badges and chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// No emphasis.
    Neutral,
    /// Informational.
    Info,
    /// Needs attention.
    Warn,
    /// Critical.
    Danger,
}

impl Tone {
    /// Short tag used by text renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Danger => "danger",
        }
    }
}

/// Badge tone for a risk level.
pub fn risk_tone(level: Option<RiskLevel>) -> Tone {
    match level {
        Some(RiskLevel::High) => Tone::Danger,
        Some(RiskLevel::Med) => Tone::Warn,
        Some(RiskLevel::Low) => Tone::Info,
        None => Tone::Neutral,
    }
}

/// Chip tone for a signal weight.
pub fn severity_tone(weight: Option<f64>) -> Tone {
    match weight {
        None => Tone::Neutral,
        Some(weight) if weight >= DANGER_WEIGHT => Tone::Danger,
        Some(weight) if weight >= WARN_WEIGHT => Tone::Warn,
        Some(_) => Tone::Info,
    }
}

/// Chip tone for a priority tag, matched case-insensitively as a substring.
pub fn priority_tone(priority: Option<&str>) -> Tone {
    let Some(priority) = priority else {
        return Tone::Neutral;
    };
    let normalized = priority.to_ascii_uppercase();
    if normalized.contains("P0") {
        Tone::Danger
    } else if normalized.contains("P1") {
        Tone::Warn
    } else if normalized.contains("P2") {
        Tone::Info
    } else {
        Tone::Neutral
    }
}

/// Badge text for a risk level.
pub fn risk_label(level: Option<RiskLevel>) -> &'static str {
    level.map(RiskLevel::as_str).unwrap_or("UNKNOWN")
}

/// Formats a distance with four decimals, or the placeholder.
pub fn format_distance(distance: Option<f64>) -> String {
    match distance {
        Some(distance) => format!("{distance:.4}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Number text for scores and weights: integral values without a fraction,
/// [`PLACEHOLDER`] when absent.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(number) if number.fract() == 0.0 && number.abs() < 1e15 => format!("{number:.0}"),
        Some(number) => number.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Parses a response body into an [`AnalysisResult`].
///
/// Absent sections default to empty lists and an absent summary. A body that
/// is valid JSON but not an object yields an empty result.
///
/// # Errors
/// Returns [`IngestError::MalformedBody`] when the body is not valid JSON.
pub fn ingest(body: &str) -> Result<AnalysisResult, IngestError> {
    let value: Value =
        serde_json::from_str(body).map_err(|error| IngestError::MalformedBody(error.to_string()))?;

    if !value.is_object() {
        return Ok(AnalysisResult::default());
    }

    // Every field is lenient, so an object never fails here.
    let wire: WireResult = serde_json::from_value(value).unwrap_or_default();
    let actions = if wire.actions.is_empty() {
        wire.recommended_actions
    } else {
        wire.actions
    };

    Ok(AnalysisResult {
        request_id: wire.request_id,
        summary: wire.summary,
        signals: wire.signals,
        actions,
        evidence: wire.evidence,
        debug: wire.debug,
    })
}

/// Classifies an HTTP reply: 2xx bodies are ingested, anything else is an
/// [`ExchangeError::Http`] carrying the raw body.
///
/// # Errors
/// Returns [`ExchangeError::Http`] for non-2xx status and
/// [`ExchangeError::Ingest`] for a 2xx body that is not JSON.
pub fn ingest_reply(status: u16, body: &str) -> Result<AnalysisResult, ExchangeError> {
    if !(200..300).contains(&status) {
        return Err(ExchangeError::Http {
            status,
            body: body.to_string(),
        });
    }

    ingest(body).map_err(ExchangeError::Ingest)
}

/// Wire shape; the service names the actions list `recommended_actions`.
#[derive(Debug, Default, Deserialize)]
struct WireResult {
    #[serde(default, deserialize_with = "lenient")]
    request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    summary: Option<Summary>,
    #[serde(default, deserialize_with = "lenient_list")]
    signals: Vec<Signal>,
    #[serde(default, deserialize_with = "lenient_list")]
    actions: Vec<ActionItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    recommended_actions: Vec<ActionItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    evidence: Vec<Evidence>,
    #[serde(default)]
    debug: Option<Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// Response ingestion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// 2xx body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),
}

/// Failure of one submission round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// Network-level failure; no HTTP status was received.
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx reply.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw body text.
        body: String,
    },
    /// 2xx reply whose body could not be ingested.
    #[error("{0}")]
    Ingest(#[from] IngestError),
}

impl ExchangeError {
    /// Short failure class for logs: `transport`, `http` or `ingest`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Http { .. } => "http",
            Self::Ingest(_) => "ingest",
        }
    }
}
