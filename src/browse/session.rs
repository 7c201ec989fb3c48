//! Browse session controller
//!
//! [`BrowseSession`] is the single owner of mutable browse state: the active
//! collection, filter state, sort order, pager, proximity trigger, search
//! debounce and quick-jump results. Surfaces hold a session and call its
//! methods; every method that changes what is visible re-renders into the
//! [`RenderSink`] it is given.
//!
//! # Workflow
//!
//! ```text
//! Session Created
//!     ↓
//! start() → render page one of the first collection
//!     ↓
//! ┌─→ User Action?
//! │   ├─ filter / sort / collection change → render_items() (cursor reset)
//! │   ├─ keystroke in search → debounce restarted
//! │   ├─ poll() after delay → quick jump + search filter → render_items()
//! │   └─ load more / viewport near sentinel → render_next_page()
//! └───────┘
//! ```

use super::debounce::{DEFAULT_DEBOUNCE_MS, Debouncer};
use super::detail::ItemDetail;
use super::pager::{DEFAULT_PAGE_SIZE, PageOutcome, PageProgress, Pager, ProximityTrigger, RenderSink};
use super::quick_jump::{DEFAULT_QUICK_JUMP_LIMIT, QuickJumpHit, quick_jump};
use crate::catalog::{Catalog, Collection, Item, SourceCategory};
use crate::config::CollectrConfig;
use crate::filters::{FilterState, PatchRange};
use crate::icon::DEFAULT_ICON_BASE_URL;
use crate::sort::{DEFAULT_COLLATION_LOCALE, NameCollator, SortOrder};
use std::time::{Duration, Instant};

/// Default number of characters before a search is applied
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Default distance in rows between viewport and sentinel that loads more
pub const DEFAULT_PROXIMITY_MARGIN: usize = 5;

/// Tunables of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub page_size: usize,
    pub search_debounce: Duration,
    pub quick_jump_limit: usize,
    pub min_query_len: usize,
    pub proximity_margin: usize,
    pub default_sort: SortOrder,
    pub show_no_source: bool,
    pub icon_base_url: String,
    /// BCP 47 locale used to collate names
    pub collation_locale: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            quick_jump_limit: DEFAULT_QUICK_JUMP_LIMIT,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            proximity_margin: DEFAULT_PROXIMITY_MARGIN,
            default_sort: SortOrder::default(),
            show_no_source: false,
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            collation_locale: DEFAULT_COLLATION_LOCALE.to_string(),
        }
    }
}

impl From<&CollectrConfig> for SessionSettings {
    fn from(config: &CollectrConfig) -> Self {
        Self {
            page_size: config.page_size,
            search_debounce: Duration::from_millis(config.search_debounce_ms),
            quick_jump_limit: config.quick_jump_limit,
            min_query_len: config.min_query_len,
            proximity_margin: config.proximity_margin,
            default_sort: SortOrder::from_label_or_default(&config.default_sort),
            show_no_source: config.show_no_source,
            icon_base_url: config.icon_base_url.clone(),
            collation_locale: config.collation_locale.clone(),
        }
    }
}

/// Browse state over a loaded catalog
pub struct BrowseSession<'a> {
    catalog: &'a Catalog,
    settings: SessionSettings,
    tabs: Vec<&'a Collection>,
    active: usize,
    filter: FilterState,
    sort: SortOrder,
    names: NameCollator,
    filtered: Vec<&'a Item>,
    pager: Pager,
    proximity: ProximityTrigger,
    search: Debouncer<String>,
    quick_jump: Vec<QuickJumpHit<'a>>,
}

impl<'a> BrowseSession<'a> {
    /// Create a session on the first tab; nothing is rendered until [`start`](Self::start)
    #[must_use]
    pub fn new(catalog: &'a Catalog, settings: SessionSettings) -> Self {
        let tabs: Vec<&'a Collection> = catalog.tabs().collect();
        Self {
            catalog,
            tabs,
            active: 0,
            filter: FilterState::new(settings.show_no_source),
            sort: settings.default_sort,
            names: NameCollator::new(&settings.collation_locale),
            filtered: Vec::new(),
            pager: Pager::new(settings.page_size),
            proximity: ProximityTrigger::new(settings.proximity_margin),
            search: Debouncer::new(settings.search_debounce),
            quick_jump: Vec::new(),
            settings,
        }
    }

    /// Replace the initial filter state and sort order
    #[must_use]
    pub fn with_state(mut self, filter: FilterState, sort: SortOrder) -> Self {
        self.filter = filter;
        self.sort = sort;
        self
    }

    /// Open on the named collection instead of the first tab
    ///
    /// Unknown or empty collections leave the first tab active.
    #[must_use]
    pub fn with_collection(mut self, name: &str) -> Self {
        if let Some(index) = self.tabs.iter().position(|c| c.name == name) {
            self.active = index;
        }
        self
    }

    /// Render the first page of the active collection
    pub fn start<S: RenderSink<'a>>(&mut self, sink: &mut S) {
        self.render_items(sink);
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Visible collections in tab order
    #[must_use]
    pub fn tabs(&self) -> &[&'a Collection] {
        &self.tabs
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn active_collection(&self) -> Option<&'a Collection> {
        self.tabs.get(self.active).copied()
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// The filtered and sorted items of the active collection
    #[must_use]
    pub fn filtered(&self) -> &[&'a Item] {
        &self.filtered
    }

    #[must_use]
    pub fn quick_jump_hits(&self) -> &[QuickJumpHit<'a>] {
        &self.quick_jump
    }

    #[must_use]
    pub const fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Current counts for the status area
    #[must_use]
    pub fn progress(&self) -> PageProgress {
        PageProgress {
            rendered: self.pager.cursor(),
            filtered: self.filtered.len(),
            total: self.active_collection().map_or(0, |c| c.items.len()),
        }
    }

    /// Switch to the tab at `index`
    ///
    /// Returns `false` without re-rendering when `index` is already active or
    /// out of range. Filters and sort order carry over.
    pub fn switch_collection<S: RenderSink<'a>>(&mut self, index: usize, sink: &mut S) -> bool {
        if index == self.active || index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        tracing::debug!(collection = %self.tabs[index].name, "switched collection");
        self.render_items(sink);
        true
    }

    /// Switch to a tab by collection name
    pub fn switch_collection_by_name<S: RenderSink<'a>>(&mut self, name: &str, sink: &mut S) -> bool {
        self.tabs
            .iter()
            .position(|c| c.name == name)
            .is_some_and(|index| self.switch_collection(index, sink))
    }

    /// Switch to the next tab, wrapping around
    pub fn next_collection<S: RenderSink<'a>>(&mut self, sink: &mut S) -> bool {
        if self.tabs.is_empty() {
            return false;
        }
        self.switch_collection((self.active + 1) % self.tabs.len(), sink)
    }

    /// Switch to the previous tab, wrapping around
    pub fn prev_collection<S: RenderSink<'a>>(&mut self, sink: &mut S) -> bool {
        if self.tabs.is_empty() {
            return false;
        }
        let len = self.tabs.len();
        self.switch_collection((self.active + len - 1) % len, sink)
    }

    pub fn toggle_category<S: RenderSink<'a>>(&mut self, category: SourceCategory, sink: &mut S) {
        self.filter.toggle_category(category);
        self.render_items(sink);
    }

    pub fn toggle_patch<S: RenderSink<'a>>(&mut self, range: PatchRange, sink: &mut S) {
        self.filter.toggle_patch(range);
        self.render_items(sink);
    }

    pub fn toggle_show_no_source<S: RenderSink<'a>>(&mut self, sink: &mut S) {
        self.filter.toggle_show_no_source();
        self.render_items(sink);
    }

    pub fn set_show_no_source<S: RenderSink<'a>>(&mut self, show: bool, sink: &mut S) {
        self.filter.set_show_no_source(show);
        self.render_items(sink);
    }

    pub fn set_sort<S: RenderSink<'a>>(&mut self, sort: SortOrder, sink: &mut S) {
        self.sort = sort;
        self.render_items(sink);
    }

    /// Advance to the next sort order
    pub fn cycle_sort<S: RenderSink<'a>>(&mut self, sink: &mut S) -> SortOrder {
        self.set_sort(self.sort.next(), sink);
        self.sort
    }

    /// Set the per-collection search filter directly, bypassing the debounce
    pub fn set_filter_query<S: RenderSink<'a>>(&mut self, query: &str, sink: &mut S) {
        self.filter.set_search_query(query);
        self.render_items(sink);
    }

    /// Reset categories, patch ranges and search
    ///
    /// The show-no-source toggle is kept. Any pending search is dropped along
    /// with the quick-jump results.
    pub fn clear_filters<S: RenderSink<'a>>(&mut self, sink: &mut S) {
        self.filter.clear_all();
        self.search = Debouncer::new(self.settings.search_debounce);
        self.quick_jump.clear();
        self.render_items(sink);
    }

    /// Record a change of the search box; applied once the debounce elapses
    pub fn input_search(&mut self, query: &str, now: Instant) {
        self.search.schedule(query.to_string(), now);
    }

    /// Apply the pending search if its delay has elapsed
    ///
    /// Returns `true` when a search was applied.
    pub fn poll<S: RenderSink<'a>>(&mut self, now: Instant, sink: &mut S) -> bool {
        match self.search.poll(now) {
            Some(query) => {
                self.apply_search(&query, sink);
                true
            }
            None => false,
        }
    }

    /// Apply a search immediately
    ///
    /// Queries shorter than the minimum length clear both the quick-jump
    /// results and the search filter. Longer ones populate both. The length
    /// counts the text as typed, surrounding spaces included; only the
    /// search filter trims it.
    pub fn apply_search<S: RenderSink<'a>>(&mut self, query: &str, sink: &mut S) {
        if query.chars().count() >= self.settings.min_query_len {
            self.quick_jump = quick_jump(self.catalog, query, self.settings.quick_jump_limit);
            self.filter.set_search_query(query);
            tracing::debug!(query, hits = self.quick_jump.len(), "search applied");
        } else {
            self.quick_jump.clear();
            self.filter.set_search_query("");
        }
        self.render_items(sink);
    }

    /// Jump to a quick-jump result
    ///
    /// Switches to the hit's collection, closes the result list and returns
    /// the item's detail.
    pub fn select_quick_jump<S: RenderSink<'a>>(&mut self, index: usize, sink: &mut S) -> Option<ItemDetail> {
        let hit = *self.quick_jump.get(index)?;
        self.switch_collection_by_name(hit.collection, sink);
        self.quick_jump.clear();
        Some(self.build_detail(hit.collection, hit.item))
    }

    /// Explicit "load more" action
    pub fn load_more<S: RenderSink<'a>>(&mut self, sink: &mut S) -> PageOutcome {
        let total = self.active_collection().map_or(0, |c| c.items.len());
        self.pager.render_next_page(&self.filtered, total, sink)
    }

    /// Report the last visible row; loads the next page near the sentinel
    pub fn on_viewport<S: RenderSink<'a>>(&mut self, viewport_end: usize, sink: &mut S) -> Option<PageOutcome> {
        let progress = self.progress();
        self.proximity
            .should_fire(viewport_end, progress.rendered, progress.has_more())
            .then(|| self.load_more(sink))
    }

    /// Detail of an item of the active collection
    #[must_use]
    pub fn detail(&self, id: u32) -> Option<ItemDetail> {
        let collection = self.active_collection()?;
        let item = collection.find_item(id)?;
        Some(self.build_detail(&collection.name, item))
    }

    fn build_detail(&self, collection: &str, item: &Item) -> ItemDetail {
        ItemDetail::build(
            collection,
            item,
            self.catalog.alt_source(item.id),
            &self.settings.icon_base_url,
        )
    }

    /// Re-filter, re-sort and render page one
    fn render_items<S: RenderSink<'a>>(&mut self, sink: &mut S) {
        let collection = self.active_collection();
        let total = collection.map_or(0, |c| c.items.len());

        let filter = &self.filter;
        self.filtered = collection
            .map(|c| c.items.iter().filter(|item| filter.passes(item)).collect())
            .unwrap_or_default();
        self.sort.sort(&mut self.filtered, &self.names);

        self.pager.reset();
        self.proximity = ProximityTrigger::new(self.settings.proximity_margin);

        sink.clear();
        sink.set_progress(PageProgress {
            rendered: 0,
            filtered: self.filtered.len(),
            total,
        });
        tracing::debug!(filtered = self.filtered.len(), total, sort = %self.sort, "rendering items");

        if self.filtered.is_empty() {
            sink.show_empty();
            return;
        }
        self.pager.render_next_page(&self.filtered, total, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::pager::CollectingSink;
    use crate::catalog::AltSourceIndex;
    use crate::testing::{numbered_collection, sample_catalog};

    fn ids(sink: &CollectingSink<'_>) -> Vec<u32> {
        sink.items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_start_renders_first_tab_sorted_by_name() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        assert_eq!(session.active_collection().unwrap().name, "Mounts");
        // Company Chocobo has no source and is hidden
        assert_eq!(ids(&sink), vec![3, 2, 4]);
        assert_eq!(sink.progress.label(), "Showing 3 / 3 (4 total)");
    }

    #[test]
    fn test_show_no_source_toggle() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        session.toggle_show_no_source(&mut sink);
        assert!(ids(&sink).contains(&1));
        assert_eq!(sink.items.len(), 4);
    }

    #[test]
    fn test_paging_and_reset_on_filter_change() {
        let catalog = Catalog::new(vec![numbered_collection("Mounts", 1, 120)], AltSourceIndex::default());
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);
        assert_eq!(sink.items.len(), 50);

        session.load_more(&mut sink);
        assert_eq!(sink.items.len(), 100);
        session.load_more(&mut sink);
        assert_eq!(sink.items.len(), 120);
        assert_eq!(session.load_more(&mut sink), PageOutcome::Exhausted);
        assert_eq!(sink.items.len(), 120);

        let clears = sink.clears;
        session.set_sort(SortOrder::Id, &mut sink);
        assert_eq!(sink.clears, clears + 1);
        assert_eq!(session.progress().rendered, 50);
        assert_eq!(sink.items.len(), 50);
    }

    #[test]
    fn test_switch_to_active_collection_is_noop() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);
        let clears = sink.clears;

        assert!(!session.switch_collection(0, &mut sink));
        assert!(!session.switch_collection(9, &mut sink));
        assert_eq!(sink.clears, clears);

        assert!(session.next_collection(&mut sink));
        assert_eq!(session.active_collection().unwrap().name, "Minions");
        assert!(session.prev_collection(&mut sink));
        assert_eq!(session.active_index(), 0);
    }

    #[test]
    fn test_debounced_search() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        let start = Instant::now();
        session.input_search("c", start);
        session.input_search("cho", start + Duration::from_millis(100));
        assert!(!session.poll(start + Duration::from_millis(350), &mut sink));
        assert!(session.poll(start + Duration::from_millis(400), &mut sink));

        assert_eq!(session.filter().query(), "cho");
        assert_eq!(ids(&sink), vec![2]);
        assert_eq!(session.quick_jump_hits().len(), 3);

        session.apply_search("c", &mut sink);
        assert!(session.quick_jump_hits().is_empty());
        assert_eq!(session.filter().query(), "");
        assert_eq!(sink.items.len(), 3);
    }

    #[test]
    fn test_padded_query_counts_its_spaces() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        session.apply_search("t ", &mut sink);
        let hits: Vec<u32> = session.quick_jump_hits().iter().map(|h| h.item.id).collect();
        assert_eq!(hits, vec![2]);
        assert_eq!(session.filter().query(), "t");
        assert_eq!(ids(&sink), vec![3, 2]);

        session.apply_search(" ", &mut sink);
        assert!(session.quick_jump_hits().is_empty());
        assert_eq!(session.filter().query(), "");
    }

    #[test]
    fn test_select_quick_jump_switches_collection() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        session.apply_search("baby", &mut sink);
        let detail = session.select_quick_jump(0, &mut sink).unwrap();
        assert_eq!(detail.id, 11);
        assert_eq!(detail.collection, "Minions");
        assert_eq!(session.active_collection().unwrap().name, "Minions");
        assert!(session.quick_jump_hits().is_empty());
        assert!(session.select_quick_jump(0, &mut sink).is_none());
    }

    #[test]
    fn test_clear_filters_keeps_toggle() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        session.toggle_show_no_source(&mut sink);
        session.toggle_patch(PatchRange::V6, &mut sink);
        assert_eq!(ids(&sink), vec![4]);
        session.input_search("ixion", Instant::now());

        session.clear_filters(&mut sink);
        assert!(!session.filter().has_active_filters());
        assert!(session.filter().show_no_source);
        assert!(!session.search_pending());
        assert_eq!(sink.items.len(), 4);
    }

    #[test]
    fn test_empty_result_shows_empty_state() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        session.toggle_category(SourceCategory::Voyages, &mut sink);
        assert!(sink.empty);
        assert!(sink.items.is_empty());
        assert_eq!(session.load_more(&mut sink), PageOutcome::Exhausted);
    }

    #[test]
    fn test_proximity_loads_next_page() {
        let catalog = Catalog::new(vec![numbered_collection("Mounts", 1, 120)], AltSourceIndex::default());
        let mut session = BrowseSession::new(&catalog, SessionSettings::default());
        let mut sink = CollectingSink::default();
        session.start(&mut sink);

        assert_eq!(session.on_viewport(10, &mut sink), None);
        assert_eq!(session.on_viewport(46, &mut sink), Some(PageOutcome::Rendered(50..100)));
        assert_eq!(sink.items.len(), 100);
    }

    #[test]
    fn test_detail_of_active_collection() {
        let catalog = sample_catalog();
        let session = BrowseSession::new(&catalog, SessionSettings::default());
        assert_eq!(session.detail(2).unwrap().title, "Fat Chocobo");
        assert!(session.detail(10).is_none());
    }

    #[test]
    fn test_with_collection_opens_named_tab() {
        let catalog = sample_catalog();
        let mut session = BrowseSession::new(&catalog, SessionSettings::default()).with_collection("Minions");
        let mut sink = CollectingSink::default();
        session.start(&mut sink);
        assert_eq!(session.active_collection().unwrap().name, "Minions");

        let session = BrowseSession::new(&catalog, SessionSettings::default()).with_collection("Nope");
        assert_eq!(session.active_index(), 0);
    }
}
