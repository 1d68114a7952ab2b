//! Collapsible evidence quotes.

use std::borrow::Cow;

/// Default number of characters shown before a quote is collapsed.
pub const DEFAULT_QUOTE_LIMIT: usize = 220;

/// Marker appended to truncated quotes.
pub const ELLIPSIS: &str = "…";

/// Returns `quote` unchanged when it has at most `limit` characters, otherwise
/// its first `limit` characters followed by [`ELLIPSIS`].
pub fn preview(quote: &str, limit: usize) -> Cow<'_, str> {
    match quote.char_indices().nth(limit) {
        None => Cow::Borrowed(quote),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &quote[..cut])),
    }
}

/// Returns `true` when the quote is long enough to need a toggle control.
pub fn needs_toggle(quote: &str, limit: usize) -> bool {
    quote.chars().nth(limit).is_some()
}

/// Rendering decision for one evidence quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteView<'a> {
    /// Quote absent or empty.
    Missing,
    /// Short quote shown in full, no toggle.
    Full(&'a str),
    /// Long quote, collapsed to its preview.
    Collapsed(Cow<'a, str>),
    /// Long quote, expanded by the user.
    Expanded(&'a str),
}

impl QuoteView<'_> {
    /// Returns `true` when a toggle control should be rendered.
    pub fn has_toggle(&self) -> bool {
        matches!(self, Self::Collapsed(_) | Self::Expanded(_))
    }
}

/// Per-item expand/collapse flags for one result's evidence list.
///
/// Items are addressed by canonical index. State is not carried across
/// results; callers [`reset`](Self::reset) it whenever the item set changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteDisclosure {
    expanded: Vec<bool>,
}

impl QuoteDisclosure {
    /// Creates collapsed state for `count` items.
    pub fn new(count: usize) -> Self {
        Self {
            expanded: vec![false; count],
        }
    }

    /// Collapses everything and resizes to `count` items.
    pub fn reset(&mut self, count: usize) {
        self.expanded.clear();
        self.expanded.resize(count, false);
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` when no items are tracked.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Returns `true` when item `index` is expanded.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Flips item `index` and returns the new flag, or `None` when out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let flag = self.expanded.get_mut(index)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Chooses how item `index` renders `quote`.
    pub fn render<'q>(&self, index: usize, quote: Option<&'q str>, limit: usize) -> QuoteView<'q> {
        let Some(quote) = quote.filter(|quote| !quote.is_empty()) else {
            return QuoteView::Missing;
        };

        if !needs_toggle(quote, limit) {
            QuoteView::Full(quote)
        } else if self.is_expanded(index) {
            QuoteView::Expanded(quote)
        } else {
            QuoteView::Collapsed(preview(quote, limit))
        }
    }
}
