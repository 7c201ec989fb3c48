//! Application state for the ratatui TUI
//!
//! Holds what the screen shows: the rendered rows appended by the browse
//! session (through [`RenderSink`]), list cursor and scroll, the search box,
//! overlay state and status messages. Filtering and paging decisions stay
//! in the session.

use crate::browse::{ItemDetail, PageProgress, QuickJumpHit, RenderSink};
use crate::catalog::{Item, SourceCategory};
use crate::filters::PatchRange;
use crate::ui::output::MessageLevel;
use std::time::{Duration, Instant};

/// Current mode of the TUI application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing the item list
    #[default]
    Normal,
    /// Typing in the search box
    Search,
    /// Choosing among quick-jump results
    QuickJump,
    /// Moving through the filter panel
    Filters,
    /// Item detail overlay is visible
    Detail,
    /// Help overlay is visible
    Help,
}

/// One selectable line of the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEntry {
    Category(SourceCategory),
    Patch(PatchRange),
    ShowNoSource,
    Sort,
}

impl FilterEntry {
    /// Panel lines in display order
    #[must_use]
    pub fn all() -> Vec<Self> {
        SourceCategory::ALL
            .into_iter()
            .map(Self::Category)
            .chain(PatchRange::ALL.into_iter().map(Self::Patch))
            .chain([Self::ShowNoSource, Self::Sort])
            .collect()
    }
}

/// A rendered list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: u32,
    pub name: String,
    pub patch: String,
    pub source_count: usize,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.display_name().to_string(),
            patch: item.patch_display(),
            source_count: item.sources.len(),
        }
    }
}

/// A quick-jump suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickJumpRow {
    pub collection: String,
    pub id: u32,
    pub name: String,
}

impl From<&QuickJumpHit<'_>> for QuickJumpRow {
    fn from(hit: &QuickJumpHit<'_>) -> Self {
        Self {
            collection: hit.collection.to_string(),
            id: hit.item.id,
            name: hit.item.display_name().to_string(),
        }
    }
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Application state for the browser
#[derive(Debug)]
pub struct AppState {
    /// Rows rendered so far, in list order
    pub rows: Vec<ItemRow>,
    /// The filtered list is empty
    pub empty: bool,
    pub progress: PageProgress,
    /// Current cursor position in `rows`
    pub cursor: usize,
    /// Scroll offset for the item list
    pub scroll_offset: usize,
    /// Height of the visible item list area (set during render)
    pub visible_height: usize,
    /// Search box text
    pub query: String,
    /// Byte position of the cursor within `query`
    pub query_cursor: usize,
    pub mode: Mode,
    pub filter_entries: Vec<FilterEntry>,
    pub filter_cursor: usize,
    pub quick_jump: Vec<QuickJumpRow>,
    pub quick_jump_cursor: usize,
    pub detail: Option<ItemDetail>,
    pub detail_scroll: u16,
    /// Set when the dataset could not be loaded
    pub load_error: Option<String>,
    pub messages: Vec<StatusMessage>,
    pub message_ttl: Duration,
    pub should_exit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            empty: false,
            progress: PageProgress::default(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20, // updated during render
            query: String::new(),
            query_cursor: 0,
            mode: Mode::Normal,
            filter_entries: FilterEntry::all(),
            filter_cursor: 0,
            quick_jump: Vec::new(),
            quick_jump_cursor: 0,
            detail: None,
            detail_scroll: 0,
            load_error: None,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(4),
            should_exit: false,
        }
    }

    /// Move cursor up
    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub const fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor up by one page
    pub const fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height);
        self.adjust_scroll();
    }

    /// Move cursor down by one page
    pub fn page_down(&mut self) {
        let max_cursor = self.rows.len().saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height).min(max_cursor);
        self.adjust_scroll();
    }

    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    pub const fn jump_to_end(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Keep the cursor inside the viewport
    const fn adjust_scroll(&mut self) {
        let height = if self.visible_height == 0 { 1 } else { self.visible_height };
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Index of the last row inside the viewport
    #[must_use]
    pub fn viewport_end(&self) -> usize {
        (self.scroll_offset + self.visible_height).saturating_sub(1)
    }

    #[must_use]
    pub fn current_row(&self) -> Option<&ItemRow> {
        self.rows.get(self.cursor)
    }

    #[must_use]
    pub fn current_filter_entry(&self) -> Option<FilterEntry> {
        self.filter_entries.get(self.filter_cursor).copied()
    }

    pub const fn filter_cursor_up(&mut self) {
        self.filter_cursor = self.filter_cursor.saturating_sub(1);
    }

    pub fn filter_cursor_down(&mut self) {
        if self.filter_cursor + 1 < self.filter_entries.len() {
            self.filter_cursor += 1;
        }
    }

    /// Replace the quick-jump suggestions
    pub fn set_quick_jump(&mut self, hits: &[QuickJumpHit<'_>]) {
        self.quick_jump = hits.iter().map(QuickJumpRow::from).collect();
        self.quick_jump_cursor = 0;
        if self.quick_jump.is_empty() && self.mode == Mode::QuickJump {
            self.mode = Mode::Search;
        }
    }

    pub const fn quick_jump_up(&mut self) {
        self.quick_jump_cursor = self.quick_jump_cursor.saturating_sub(1);
    }

    pub fn quick_jump_down(&mut self) {
        if self.quick_jump_cursor + 1 < self.quick_jump.len() {
            self.quick_jump_cursor += 1;
        }
    }

    /// Show the detail overlay
    pub fn open_detail(&mut self, detail: ItemDetail) {
        self.detail = Some(detail);
        self.detail_scroll = 0;
        self.mode = Mode::Detail;
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.mode = Mode::Normal;
    }

    /// Add a character to the query
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove the character before the cursor
    pub fn query_backspace(&mut self) -> bool {
        if self.query_cursor == 0 {
            return false;
        }
        let prev_char_boundary = self.query[..self.query_cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.query.remove(prev_char_boundary);
        self.query_cursor = prev_char_boundary;
        true
    }

    /// Delete the character under the cursor
    pub fn query_delete(&mut self) -> bool {
        if self.query_cursor >= self.query.len() {
            return false;
        }
        self.query.remove(self.query_cursor);
        true
    }

    pub fn query_cursor_left(&mut self) {
        if self.query_cursor > 0 {
            self.query_cursor = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    pub fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    pub fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }

    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text.into()));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    pub fn cleanup_messages(&mut self) {
        self.messages.retain(|m| !m.is_expired(self.message_ttl));
    }
}

impl<'a> RenderSink<'a> for AppState {
    fn clear(&mut self) {
        self.rows.clear();
        self.empty = false;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    fn show_empty(&mut self) {
        self.empty = true;
    }

    fn append(&mut self, items: &[&'a Item]) {
        self.rows.extend(items.iter().map(|item| ItemRow::from(*item)));
    }

    fn set_progress(&mut self, progress: PageProgress) {
        self.progress = progress;
    }
}
