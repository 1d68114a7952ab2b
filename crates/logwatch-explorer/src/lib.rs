#![warn(missing_docs)]
//! # logwatch-explorer
//!
//! ## Purpose
//! Computes the visible subset of each result category and the collapsed or
//! expanded rendering of long evidence quotes.
//!
//! ## Responsibilities
//! - Case-insensitive substring search over designated fields per category.
//! - Evidence-only "quoted" filter and distance/title ordering.
//! - Deterministic quote truncation and per-item disclosure state.
//!
//! ## Data flow
//! Canonical category list + filter inputs -> [`filter_signals`],
//! [`filter_actions`], [`filter_evidence`] -> ordered [`Entry`] views.
//! Evidence quotes -> [`QuoteDisclosure::render`] -> [`QuoteView`].
//!
//! ## Ownership and lifetimes
//! Pipelines borrow the canonical list and return fresh vectors of borrowed
//! entries. The source list is never reordered, so every recomputation starts
//! from the original service order.
//!
//! ## Error model
//! Pipelines are total: missing fields never match and never fail.

mod disclosure;
mod pipeline;

pub use disclosure::{
    DEFAULT_QUOTE_LIMIT, ELLIPSIS, QuoteDisclosure, QuoteView, needs_toggle, preview,
};
pub use pipeline::{
    Entry, EvidenceFilter, EvidenceSort, Searchable, SortParseError, filter_actions,
    filter_evidence, filter_items, filter_signals, normalize_query,
};
