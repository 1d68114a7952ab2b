//! Filter and sort pipelines over result categories.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use logwatch_analysis_contract::{ActionItem, Evidence, Signal};
use thiserror::Error;

/// One item of a filtered view, tagged with its position in the canonical list.
#[derive(Debug, PartialEq)]
pub struct Entry<'a, T> {
    /// Index into the unfiltered category list.
    pub index: usize,
    /// Borrowed item.
    pub item: &'a T,
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

impl<T> Deref for Entry<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.item
    }
}

/// Category items that expose free-text searchable fields.
pub trait Searchable {
    /// Present searchable fields; absent ones are skipped.
    fn search_fields(&self) -> impl Iterator<Item = &str>;

    /// Returns `true` when any field contains `needle`, which must already be
    /// normalized by [`normalize_query`].
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Signal {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [self.key.as_deref(), self.reason.as_deref()]
            .into_iter()
            .flatten()
    }
}

impl Searchable for ActionItem {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.action.as_deref(),
            self.priority.as_deref(),
            self.why.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

impl Searchable for Evidence {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.title.as_deref(),
            self.doc_id.as_deref(),
            self.section.as_deref(),
            self.chunk_id.as_deref(),
            self.quote.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Trims and lower-cases a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Keeps items matching `query` in canonical order. Empty query is identity.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<Entry<'a, T>> {
    let needle = normalize_query(query);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| needle.is_empty() || item.matches(&needle))
        .map(|(index, item)| Entry { index, item })
        .collect()
}

/// Signals matching `query` on `key` or `reason`.
pub fn filter_signals<'a>(items: &'a [Signal], query: &str) -> Vec<Entry<'a, Signal>> {
    filter_items(items, query)
}

/// Actions matching `query` on `action`, `priority` or `why`.
pub fn filter_actions<'a>(items: &'a [ActionItem], query: &str) -> Vec<Entry<'a, ActionItem>> {
    filter_items(items, query)
}

/// Evidence ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvidenceSort {
    /// Ascending distance; missing distance sorts as 999.
    #[default]
    Distance,
    /// Ascending `title`, falling back to `doc_id`, then empty.
    Title,
}

impl fmt::Display for EvidenceSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => f.write_str("distance"),
            Self::Title => f.write_str("title"),
        }
    }
}

impl FromStr for EvidenceSort {
    type Err = SortParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "title" => Ok(Self::Title),
            other => Err(SortParseError(other.to_string())),
        }
    }
}

/// Unknown evidence sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected distance or title)")]
pub struct SortParseError(pub String);

/// Evidence pipeline inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceFilter {
    /// Free-text query.
    pub query: String,
    /// Drop items whose quote is absent or blank.
    pub only_quoted: bool,
    /// Result ordering.
    pub sort: EvidenceSort,
}

/// Evidence view: text filter, then quoted filter, then a stable sort.
pub fn filter_evidence<'a>(
    items: &'a [Evidence],
    filter: &EvidenceFilter,
) -> Vec<Entry<'a, Evidence>> {
    let mut entries = filter_items(items, &filter.query);

    if filter.only_quoted {
        entries.retain(|entry| entry.has_quote());
    }

    match filter.sort {
        EvidenceSort::Distance => {
            // Numeric equality, so 0.0 and -0.0 tie and keep their input order.
            entries.sort_by(|a, b| {
                a.sort_distance()
                    .partial_cmp(&b.sort_distance())
                    .unwrap_or(Ordering::Equal)
            });
        }
        EvidenceSort::Title => entries.sort_by(|a, b| a.sort_title().cmp(b.sort_title())),
    }

    entries
}
