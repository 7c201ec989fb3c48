//! Incremental page rendering
//!
//! The filtered list is appended to a [`RenderSink`] one page at a time. The
//! [`Pager`] owns the cursor (items rendered so far) and a loading guard, and
//! [`ProximityTrigger`] decides when scrolling near the end should request
//! the next page. Explicit "load more" actions and the proximity trigger both
//! go through [`Pager::render_next_page`].

use crate::catalog::Item;
use std::ops::Range;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Receiver of render instructions
///
/// Implemented by the terminal UI state and by the collecting sink used by
/// one-shot commands.
pub trait RenderSink<'a> {
    /// Remove everything rendered so far
    fn clear(&mut self);

    /// Show the "no results" state
    fn show_empty(&mut self);

    /// Append a page of items after the ones already rendered
    fn append(&mut self, items: &[&'a Item]);

    /// Update the count and remaining labels
    fn set_progress(&mut self, progress: PageProgress);
}

/// Counts shown in the status area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageProgress {
    pub rendered: usize,
    pub filtered: usize,
    pub total: usize,
}

impl PageProgress {
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.filtered.saturating_sub(self.rendered)
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.rendered < self.filtered
    }

    /// `Showing 50 / 120 (300 total)`
    #[must_use]
    pub fn label(&self) -> String {
        format!("Showing {} / {} ({} total)", self.rendered, self.filtered, self.total)
    }

    /// `70 remaining`, or `None` when everything is rendered
    #[must_use]
    pub fn remaining_label(&self) -> Option<String> {
        self.has_more().then(|| format!("{} remaining", self.remaining()))
    }
}

/// Result of a page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The slice of the filtered list that was appended
    Rendered(Range<usize>),
    /// A page is already being rendered
    Busy,
    /// Every filtered item is already rendered
    Exhausted,
}

/// Cursor and loading guard over the filtered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    cursor: usize,
    loading: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// Create a pager; a page size of zero is raised to one
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            cursor: 0,
            loading: false,
        }
    }

    /// Start over from the first page
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.loading = false;
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items rendered so far
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Claim the next page of a list of `len` items
    ///
    /// Returns `None` without touching state while a page is in flight or
    /// when the cursor has reached the end. Otherwise sets the loading guard
    /// until [`finish`](Self::finish) is called with the returned range.
    pub fn try_begin(&mut self, len: usize) -> Option<Range<usize>> {
        if self.loading || self.cursor >= len {
            return None;
        }
        self.loading = true;
        Some(self.cursor..(self.cursor + self.page_size).min(len))
    }

    /// Advance past a claimed range and release the guard
    pub fn finish(&mut self, range: &Range<usize>) {
        self.cursor = range.end;
        self.loading = false;
    }

    /// Append the next page of `filtered` to the sink
    pub fn render_next_page<'a, S: RenderSink<'a>>(
        &mut self,
        filtered: &[&'a Item],
        total: usize,
        sink: &mut S,
    ) -> PageOutcome {
        if self.loading {
            return PageOutcome::Busy;
        }
        let Some(range) = self.try_begin(filtered.len()) else {
            return PageOutcome::Exhausted;
        };

        sink.append(&filtered[range.clone()]);
        self.finish(&range);
        sink.set_progress(PageProgress {
            rendered: self.cursor,
            filtered: filtered.len(),
            total,
        });

        tracing::trace!(start = range.start, end = range.end, "rendered page");
        PageOutcome::Rendered(range)
    }
}

/// Fires when the viewport comes within a margin of the sentinel row
///
/// The sentinel sits right after the last rendered row. The trigger fires at
/// most once per rendered count, so a viewport that stays near the end does
/// not request the same page twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityTrigger {
    margin: usize,
    fired_at: Option<usize>,
}

impl ProximityTrigger {
    #[must_use]
    pub const fn new(margin: usize) -> Self {
        Self {
            margin,
            fired_at: None,
        }
    }

    #[must_use]
    pub const fn margin(&self) -> usize {
        self.margin
    }

    /// Check the trigger for a viewport whose last visible row is `viewport_end`
    pub fn should_fire(&mut self, viewport_end: usize, rendered: usize, has_more: bool) -> bool {
        if !has_more || self.fired_at == Some(rendered) {
            return false;
        }
        if viewport_end + self.margin >= rendered {
            self.fired_at = Some(rendered);
            return true;
        }
        false
    }
}

/// Sink that keeps everything it is given, for one-shot commands and tests
#[derive(Debug, Default)]
pub struct CollectingSink<'a> {
    pub items: Vec<&'a Item>,
    pub progress: PageProgress,
    pub empty: bool,
    pub clears: usize,
}

impl<'a> RenderSink<'a> for CollectingSink<'a> {
    fn clear(&mut self) {
        self.items.clear();
        self.empty = false;
        self.clears += 1;
    }

    fn show_empty(&mut self) {
        self.empty = true;
    }

    fn append(&mut self, items: &[&'a Item]) {
        self.items.extend_from_slice(items);
    }

    fn set_progress(&mut self, progress: PageProgress) {
        self.progress = progress;
    }
}
