//! Filter vocabulary and state
//!
//! - `PatchRange`: the fixed table of version ranges
//! - `FilterState`: the active predicates, mutated in place by the session

use super::error::FilterError;
use crate::catalog::{Item, Patch, SourceCategory};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Version range selectable in the patch filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatchRange {
    V7,
    V6,
    V5,
    V4,
    V3,
    V2,
    Unknown,
}

impl PatchRange {
    /// Every range, newest first
    pub const ALL: [Self; 7] = [
        Self::V7,
        Self::V6,
        Self::V5,
        Self::V4,
        Self::V3,
        Self::V2,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::V7 => "7.x",
            Self::V6 => "6.x",
            Self::V5 => "5.x",
            Self::V4 => "4.x",
            Self::V3 => "3.x",
            Self::V2 => "2.x",
            Self::Unknown => "unknown",
        }
    }

    /// Inclusive `(min, max)` bounds of the range
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::V7 => (7.0, 7.99),
            Self::V6 => (6.0, 6.99),
            Self::V5 => (5.0, 5.99),
            Self::V4 => (4.0, 4.99),
            Self::V3 => (3.0, 3.99),
            Self::V2 => (2.0, 2.99),
            Self::Unknown => (999.0, 9999.0),
        }
    }

    /// Whether a patch value falls within this range
    ///
    /// Unknown patches only ever match [`PatchRange::Unknown`].
    #[must_use]
    pub fn contains(self, patch: Patch) -> bool {
        if patch.is_unknown() != (self == Self::Unknown) {
            return false;
        }
        let (min, max) = self.bounds();
        (min..=max).contains(&patch.value())
    }
}

impl FromStr for PatchRange {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::UnknownPatchRange(s.to_string()))
    }
}

impl fmt::Display for PatchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The active filter predicates
///
/// Composition is AND across predicate families and OR within a family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub categories: BTreeSet<SourceCategory>,
    pub patches: BTreeSet<PatchRange>,
    /// Trimmed, lowercased search text
    query: String,
    pub show_no_source: bool,
}

impl FilterState {
    #[must_use]
    pub fn new(show_no_source: bool) -> Self {
        Self {
            show_no_source,
            ..Self::default()
        }
    }

    /// Add the category if absent, remove it otherwise
    pub fn toggle_category(&mut self, category: SourceCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// Add the range if absent, remove it otherwise
    pub fn toggle_patch(&mut self, range: PatchRange) {
        if !self.patches.remove(&range) {
            self.patches.insert(range);
        }
    }

    pub fn toggle_show_no_source(&mut self) {
        self.show_no_source = !self.show_no_source;
    }

    pub fn set_show_no_source(&mut self, show: bool) {
        self.show_no_source = show;
    }

    /// Store the query trimmed and lowercased
    pub fn set_search_query(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Reset categories, patch ranges and query
    ///
    /// The show-no-source toggle is kept.
    pub fn clear_all(&mut self) {
        self.categories.clear();
        self.patches.clear();
        self.query.clear();
    }

    /// Whether any category, patch range or query is set
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty() || !self.patches.is_empty() || !self.query.is_empty()
    }

    /// Evaluate every predicate against an item
    #[must_use]
    pub fn passes(&self, item: &Item) -> bool {
        passes(item, self)
    }
}

/// Decide whether an item is visible under the filter state
///
/// Rules are checked in order and the first failure rejects:
/// source presence, search text, patch range, category.
#[must_use]
pub fn passes(item: &Item, state: &FilterState) -> bool {
    if !state.show_no_source && !item.has_sources() {
        return false;
    }

    if !state.query.is_empty() {
        let in_name = item.name.to_lowercase().contains(&state.query);
        if !in_name && !item.description.to_lowercase().contains(&state.query) {
            return false;
        }
    }

    if !state.patches.is_empty() && !state.patches.iter().any(|range| range.contains(item.patch)) {
        return false;
    }

    if !state.categories.is_empty()
        && !item
            .sources
            .iter()
            .any(|source| source.has_any_category(&state.categories))
    {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourceType;
    use crate::testing::{item, source};

    #[test]
    fn test_no_source_toggle() {
        let chocobo = item(1, "Company Chocobo", 2.1, vec![]);
        let mut state = FilterState::default();
        assert!(!passes(&chocobo, &state));

        state.toggle_show_no_source();
        assert!(passes(&chocobo, &state));
    }

    #[test]
    fn test_patch_range_filter() {
        let old = item(1, "Old", 2.4, vec![source(SourceType::Quest, &[])]);
        let newer = item(2, "Newer", 3.0, vec![source(SourceType::Quest, &[])]);

        let mut state = FilterState::default();
        state.toggle_patch(PatchRange::V2);
        assert!(passes(&old, &state));
        assert!(!passes(&newer, &state));

        state.toggle_patch(PatchRange::V3);
        assert!(passes(&newer, &state));
    }

    #[test]
    fn test_unknown_patch_only_matches_unknown_range() {
        let mystery = item(1, "Mystery", 999.0, vec![source(SourceType::Misc, &[])]);
        let mut state = FilterState::default();
        for range in PatchRange::ALL.into_iter().filter(|r| *r != PatchRange::Unknown) {
            state.toggle_patch(range);
        }
        assert!(!passes(&mystery, &state));

        state.toggle_patch(PatchRange::Unknown);
        assert!(passes(&mystery, &state));
        assert!(!PatchRange::Unknown.contains(Patch::new(6.5).unwrap()));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(PatchRange::V6.contains(Patch::new(6.0).unwrap()));
        assert!(PatchRange::V6.contains(Patch::new(6.99).unwrap()));
        assert!(!PatchRange::V6.contains(Patch::new(7.0).unwrap()));
    }

    #[test]
    fn test_query_matches_name_or_description() {
        let mut chocobo = item(1, "Chocobo", 2.0, vec![source(SourceType::Shop, &[])]);
        chocobo.description = "A loyal bird".to_string();
        let cactuar = item(2, "Cactuar", 2.0, vec![source(SourceType::Shop, &[])]);

        let mut state = FilterState::default();
        state.set_search_query("  CHO ");
        assert_eq!(state.query(), "cho");
        assert!(passes(&chocobo, &state));
        assert!(!passes(&cactuar, &state));

        state.set_search_query("loyal");
        assert!(passes(&chocobo, &state));

        state.set_search_query("");
        assert!(passes(&cactuar, &state));
    }

    #[test]
    fn test_category_filter_is_or_within_family() {
        let gil = item(1, "Gil item", 2.0, vec![source(SourceType::Shop, &[SourceCategory::Gil])]);
        let pvp = item(2, "PvP item", 2.0, vec![source(SourceType::PvPSeries, &[SourceCategory::PvP])]);
        let bare = item(3, "Bare", 2.0, vec![]);

        let mut state = FilterState::new(true);
        state.toggle_category(SourceCategory::Gil);
        assert!(passes(&gil, &state));
        assert!(!passes(&pvp, &state));
        assert!(!passes(&bare, &state));

        state.toggle_category(SourceCategory::PvP);
        assert!(passes(&pvp, &state));

        state.toggle_category(SourceCategory::Gil);
        assert!(!passes(&gil, &state));
    }

    #[test]
    fn test_clear_all_keeps_toggle() {
        let mut state = FilterState::new(true);
        state.toggle_category(SourceCategory::Mgp);
        state.toggle_patch(PatchRange::V5);
        state.set_search_query("moogle");
        assert!(state.has_active_filters());

        state.clear_all();
        assert!(!state.has_active_filters());
        assert!(state.show_no_source);
    }

    #[test]
    fn test_passes_does_not_mutate_item() {
        let it = item(1, "Chocobo", 2.0, vec![source(SourceType::Shop, &[SourceCategory::Gil])]);
        let before = it.clone();
        let mut state = FilterState::default();
        state.set_search_query("cho");
        let first = passes(&it, &state);
        let second = passes(&it, &state);
        assert_eq!(first, second);
        assert_eq!(it, before);
    }

    #[test]
    fn test_patch_range_parse() {
        assert_eq!("2.x".parse::<PatchRange>().unwrap(), PatchRange::V2);
        assert_eq!("UNKNOWN".parse::<PatchRange>().unwrap(), PatchRange::Unknown);
        assert!(matches!(
            "8.x".parse::<PatchRange>(),
            Err(FilterError::UnknownPatchRange(_))
        ));
    }
}
