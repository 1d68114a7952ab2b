#![warn(missing_docs)]
//! # logwatch-ui
//!
//! ## Purpose
//! Defines the explorer session state and the single reducer that drives it.
//!
//! ## Responsibilities
//! - Gate section navigation on the presence of a result ([`ViewNavigator`]).
//! - Hold input text, retrieval mode, filter inputs, quote disclosure and the
//!   current result or error in one [`Session`] record.
//! - Issue request tokens and drop responses to superseded submissions.
//!
//! ## Data flow
//! UI events -> [`reduce`] -> next [`Session`] + optional [`Effect`]. A
//! [`Effect::Dispatch`] is executed by the app layer, whose reply re-enters as
//! [`Event::ResponseReceived`].
//!
//! ## Ownership and lifetimes
//! `Session` owns everything it renders. Filtered views borrow from it and are
//! recomputed on every read, so no view outlives the result it came from.
//!
//! ## Error model
//! Errors are state, not control flow: a failed compose or exchange lands in
//! [`Session::error`], and exactly one of result, error, or neither is visible.

use std::fmt;
use std::str::FromStr;

use logwatch_analysis_contract::{
    ActionItem, AnalysisResult, Evidence, ExchangeError, SectionCounts, Signal,
};
use logwatch_core::{ParseError, RetrievalMode, SAMPLE_LOW, Sample, compose};
use logwatch_explorer::{
    DEFAULT_QUOTE_LIMIT, Entry, EvidenceFilter, EvidenceSort, QuoteDisclosure, QuoteView,
    filter_actions, filter_evidence, filter_signals, needs_toggle,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Explorer sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Summary and section counts. Always reachable.
    #[default]
    Overview,
    /// Signals and recommended actions. Requires a result.
    Signals,
    /// Evidence list. Requires a result.
    Evidence,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overview => "overview",
            Self::Signals => "signals",
            Self::Evidence => "evidence",
        };
        f.write_str(name)
    }
}

impl FromStr for View {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "signals" => Ok(Self::Signals),
            "evidence" => Ok(Self::Evidence),
            other => Err(SelectionError::UnknownView(other.to_string())),
        }
    }
}

/// View state machine with result-gated transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewNavigator {
    view: View,
}

impl ViewNavigator {
    /// Creates a navigator on [`View::Overview`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view.
    pub fn current(&self) -> View {
        self.view
    }

    /// Moves to `target` when reachable. Returns `false` for a no-op.
    pub fn select_view(&mut self, target: View, result_present: bool) -> bool {
        if target != View::Overview && !result_present {
            return false;
        }
        self.view = target;
        true
    }

    /// Forces the overview.
    pub fn reset(&mut self) {
        self.view = View::Overview;
    }
}

/// Searchable result categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Signals list.
    Signals,
    /// Recommended actions list.
    Actions,
    /// Evidence list.
    Evidence,
}

impl FromStr for Category {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "signals" => Ok(Self::Signals),
            "actions" => Ok(Self::Actions),
            "evidence" => Ok(Self::Evidence),
            other => Err(SelectionError::UnknownCategory(other.to_string())),
        }
    }
}

/// Unknown view or category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Not one of overview/signals/evidence.
    #[error("unknown view '{0}' (expected overview, signals or evidence)")]
    UnknownView(String),
    /// Not one of signals/actions/evidence.
    #[error("unknown category '{0}' (expected signals, actions or evidence)")]
    UnknownCategory(String),
}

/// Monotonic submission token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User-visible error held by the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Input text could not be composed into a payload; nothing was sent.
    #[error("JSON parse failed, check the input JSON format: {0}")]
    Parse(#[from] ParseError),
    /// Submission failed in transport, HTTP status, or ingestion.
    #[error("{0}")]
    Exchange(#[from] ExchangeError),
}

/// UI events consumed by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Input text replaced by the user.
    InputEdited(String),
    /// Analyze pressed.
    SubmitRequested,
    /// Bundled sample loaded into the input.
    SampleSelected(Sample),
    /// Section navigation.
    ViewSelected(View),
    /// Free-text query for one category.
    QueryChanged(Category, String),
    /// Evidence "only quoted" toggle.
    OnlyQuotedChanged(bool),
    /// Evidence ordering.
    EvidenceSortChanged(EvidenceSort),
    /// Expand/collapse of the evidence quote at a canonical index.
    QuoteToggled(usize),
    /// Retrieval mode used by the next submission.
    RetrievalModeChanged(RetrievalMode),
    /// Outcome of a dispatched submission.
    ResponseReceived {
        /// Token issued with the matching [`Effect::Dispatch`].
        token: RequestToken,
        /// Ingested result or exchange failure.
        outcome: Result<AnalysisResult, ExchangeError>,
    },
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send `payload` to the analysis service and report back with `token`.
    Dispatch {
        /// Token to echo in [`Event::ResponseReceived`].
        token: RequestToken,
        /// Composed request body.
        payload: Value,
    },
}

/// Per-category filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Signals query.
    pub signals: String,
    /// Actions query.
    pub actions: String,
    /// Evidence query, quoted toggle and ordering.
    pub evidence: EvidenceFilter,
}

/// Explorer session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    input: String,
    retrieval_mode: RetrievalMode,
    navigator: ViewNavigator,
    result: Option<AnalysisResult>,
    error: Option<SessionError>,
    filters: Filters,
    disclosure: QuoteDisclosure,
    quote_limit: usize,
    pending: Option<RequestToken>,
    issued: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SAMPLE_LOW, RetrievalMode::default())
    }
}

impl Session {
    /// Creates a session with `input` text and no result.
    pub fn new(input: impl Into<String>, retrieval_mode: RetrievalMode) -> Self {
        Self {
            input: input.into(),
            retrieval_mode,
            navigator: ViewNavigator::new(),
            result: None,
            error: None,
            filters: Filters::default(),
            disclosure: QuoteDisclosure::default(),
            quote_limit: DEFAULT_QUOTE_LIMIT,
            pending: None,
            issued: 0,
        }
    }

    /// Overrides the quote preview length.
    pub fn with_quote_limit(mut self, quote_limit: usize) -> Self {
        self.quote_limit = quote_limit;
        self
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Retrieval mode for the next submission.
    pub fn retrieval_mode(&self) -> RetrievalMode {
        self.retrieval_mode
    }

    /// Visible view; always overview while no result is loaded.
    pub fn view(&self) -> View {
        if self.result.is_none() {
            View::Overview
        } else {
            self.navigator.current()
        }
    }

    /// Loaded result.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Visible error.
    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Filter inputs.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Quote preview length.
    pub fn quote_limit(&self) -> usize {
        self.quote_limit
    }

    /// Outstanding submission token.
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Item counts of the loaded result.
    pub fn section_counts(&self) -> SectionCounts {
        self.result
            .as_ref()
            .map(AnalysisResult::section_counts)
            .unwrap_or_default()
    }

    /// Signals matching the signals query.
    pub fn visible_signals(&self) -> Vec<Entry<'_, Signal>> {
        self.result
            .as_ref()
            .map(|result| filter_signals(&result.signals, &self.filters.signals))
            .unwrap_or_default()
    }

    /// Actions matching the actions query.
    pub fn visible_actions(&self) -> Vec<Entry<'_, ActionItem>> {
        self.result
            .as_ref()
            .map(|result| filter_actions(&result.actions, &self.filters.actions))
            .unwrap_or_default()
    }

    /// Evidence after text filter, quoted filter and ordering.
    pub fn visible_evidence(&self) -> Vec<Entry<'_, Evidence>> {
        self.result
            .as_ref()
            .map(|result| filter_evidence(&result.evidence, &self.filters.evidence))
            .unwrap_or_default()
    }

    /// Quote rendering for the evidence item at canonical `index`.
    pub fn quote_view(&self, index: usize) -> QuoteView<'_> {
        let quote = self
            .result
            .as_ref()
            .and_then(|result| result.evidence.get(index))
            .and_then(|evidence| evidence.quote.as_deref());
        self.disclosure.render(index, quote, self.quote_limit)
    }

    /// Applies one event in place and returns the requested effect.
    pub fn apply(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::InputEdited(text) => {
                self.input = text;
                None
            }
            Event::SubmitRequested => self.on_submit_requested(),
            Event::SampleSelected(sample) => {
                self.clear_displayed();
                if let Some(token) = self.pending.take() {
                    debug!(%token, "sample loaded, abandoning in-flight submission");
                }
                self.input = sample.text().to_string();
                info!(%sample, "sample loaded");
                None
            }
            Event::ViewSelected(target) => {
                if self.navigator.select_view(target, self.result.is_some()) {
                    debug!(view = %target, "view selected");
                } else {
                    debug!(view = %target, "view unreachable without a result");
                }
                None
            }
            Event::QueryChanged(category, text) => {
                match category {
                    Category::Signals => self.filters.signals = text,
                    Category::Actions => self.filters.actions = text,
                    Category::Evidence => self.filters.evidence.query = text,
                }
                None
            }
            Event::OnlyQuotedChanged(only_quoted) => {
                self.filters.evidence.only_quoted = only_quoted;
                None
            }
            Event::EvidenceSortChanged(sort) => {
                self.filters.evidence.sort = sort;
                None
            }
            Event::QuoteToggled(index) => {
                let toggleable = self
                    .result
                    .as_ref()
                    .and_then(|result| result.evidence.get(index))
                    .and_then(|evidence| evidence.quote.as_deref())
                    .is_some_and(|quote| needs_toggle(quote, self.quote_limit));
                if toggleable {
                    self.disclosure.toggle(index);
                }
                None
            }
            Event::RetrievalModeChanged(mode) => {
                self.retrieval_mode = mode;
                None
            }
            Event::ResponseReceived { token, outcome } => {
                self.on_response(token, outcome);
                None
            }
        }
    }

    fn on_submit_requested(&mut self) -> Option<Effect> {
        if let Some(token) = self.pending {
            debug!(%token, "submission already in flight, ignoring");
            return None;
        }

        self.clear_displayed();
        match compose(&self.input, self.retrieval_mode) {
            Ok(payload) => {
                self.issued += 1;
                let token = RequestToken(self.issued);
                self.pending = Some(token);
                info!(%token, mode = %self.retrieval_mode, "submission dispatched");
                Some(Effect::Dispatch { token, payload })
            }
            Err(error) => {
                info!(%error, "submission aborted, input is not a valid payload");
                self.error = Some(SessionError::Parse(error));
                None
            }
        }
    }

    fn on_response(&mut self, token: RequestToken, outcome: Result<AnalysisResult, ExchangeError>) {
        if self.pending != Some(token) {
            debug!(%token, "discarding response to superseded submission");
            return;
        }
        self.pending = None;

        match outcome {
            Ok(result) => {
                info!(
                    %token,
                    signals = result.signals.len(),
                    actions = result.actions.len(),
                    evidence = result.evidence.len(),
                    "analysis result applied"
                );
                self.disclosure.reset(result.evidence.len());
                self.error = None;
                self.result = Some(result);
            }
            Err(error) => {
                info!(%token, kind = error.kind(), "analysis failed");
                self.clear_displayed();
                self.error = Some(SessionError::Exchange(error));
            }
        }
    }

    fn clear_displayed(&mut self) {
        self.navigator.reset();
        self.result = None;
        self.error = None;
        self.disclosure.reset(0);
    }
}

/// Pure transition: consumes the current session and one event, returns the
/// next session and any effect to execute.
pub fn reduce(mut session: Session, event: Event) -> (Session, Option<Effect>) {
    let effect = session.apply(event);
    (session, effect)
}
