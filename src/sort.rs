//! Sort orders for the filtered item list
//!
//! All orders are total and applied with a stable sort, so ties keep dataset
//! order. Names are collated for a configurable locale (zh-TW by default,
//! matching the dataset's language) through ICU4X.

use crate::catalog::Item;
use crate::filters::FilterError;
use clap::ValueEnum;
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use icu_locale_core::Locale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Order of the rendered item list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Display name
    #[default]
    Name,
    /// Patch added, oldest first
    PatchAsc,
    /// Patch added, newest first
    PatchDesc,
    /// Item id
    Id,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::Name, Self::PatchAsc, Self::PatchDesc, Self::Id];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PatchAsc => "patch-asc",
            Self::PatchDesc => "patch-desc",
            Self::Id => "id",
        }
    }

    /// Parse a label, falling back to name order when unrecognised
    #[must_use]
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "falling back to name order");
            Self::default()
        })
    }

    /// The next order in the cycle used by the sort key
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::PatchAsc,
            Self::PatchAsc => Self::PatchDesc,
            Self::PatchDesc => Self::Id,
            Self::Id => Self::Name,
        }
    }

    /// Compare two items under this order
    #[must_use]
    pub fn compare(self, a: &Item, b: &Item, names: &NameCollator) -> Ordering {
        match self {
            Self::Name => names.compare(a.display_name(), b.display_name()),
            Self::PatchAsc => a.patch.total_cmp(&b.patch),
            Self::PatchDesc => b.patch.total_cmp(&a.patch),
            Self::Id => a.id.cmp(&b.id),
        }
    }

    /// Stable-sort a filtered list in place
    pub fn sort(self, items: &mut [&Item], names: &NameCollator) {
        items.sort_by(|a, b| self.compare(a, b, names));
    }
}

/// Locale used for name collation when none is configured
pub const DEFAULT_COLLATION_LOCALE: &str = "zh-TW";

/// Locale-aware name comparison
///
/// Equal collation keys fall back to the raw text so the order stays total.
/// When the locale cannot be parsed or has no collation data the comparison
/// degrades to case-folded code point order.
pub struct NameCollator {
    locale: String,
    collator: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    /// Build a collator for a BCP 47 locale such as `zh-TW` or `en`
    #[must_use]
    pub fn new(locale: &str) -> Self {
        let collator = match locale.parse::<Locale>() {
            Ok(parsed) => Collator::try_new(CollatorPreferences::from(parsed), CollatorOptions::default())
                .map_err(|e| tracing::warn!(locale, error = %e, "no collation data, using code point order"))
                .ok(),
            Err(e) => {
                tracing::warn!(locale, error = %e, "invalid collation locale, using code point order");
                None
            }
        };

        Self {
            locale: locale.to_string(),
            collator,
        }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether locale collation is in effect
    #[must_use]
    pub const fn is_localized(&self) -> bool {
        self.collator.is_some()
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new(DEFAULT_COLLATION_LOCALE)
    }
}

impl fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameCollator")
            .field("locale", &self.locale)
            .field("localized", &self.is_localized())
            .finish()
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|order| order.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::UnknownSort(s.to_string()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::item;

    fn ids(items: &[&Item]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    fn sorted(order: SortOrder, items: &mut [&Item]) {
        order.sort(items, &NameCollator::default());
    }

    #[test]
    fn test_name_order_is_case_insensitive() {
        let a = item(1, "baby Chocobo", 2.0, vec![]);
        let b = item(2, "Aether Wisp", 2.0, vec![]);
        let c = item(3, "Cactuar", 2.0, vec![]);
        let mut list = vec![&c, &a, &b];
        sorted(SortOrder::Name, &mut list);
        assert_eq!(ids(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_accented_names_collate_with_their_base_letter() {
        let zu = item(1, "Zu", 2.0, vec![]);
        let eclair = item(2, "Éclair", 2.0, vec![]);
        let mut list = vec![&zu, &eclair];
        sorted(SortOrder::Name, &mut list);
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn test_chinese_names_follow_locale_order() {
        // 卜 (U+535C) precedes 丈 (U+4E08) in zh-TW collation but not by code point
        let zhang = item(1, "丈", 2.0, vec![]);
        let bu = item(2, "卜", 2.0, vec![]);
        let mut list = vec![&zhang, &bu];
        sorted(SortOrder::Name, &mut list);
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn test_invalid_locale_falls_back_to_code_points() {
        let names = NameCollator::new("not a locale!");
        assert!(!names.is_localized());
        assert_eq!(names.locale(), "not a locale!");
        assert_eq!(names.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(names.compare("a", "A"), Ordering::Greater);
    }

    #[test]
    fn test_default_collator_is_localized() {
        let names = NameCollator::default();
        assert!(names.is_localized());
        assert_eq!(names.locale(), DEFAULT_COLLATION_LOCALE);
        assert_ne!(names.compare("a", "A"), Ordering::Equal);
    }

    #[test]
    fn test_patch_orders_are_stable() {
        let a = item(1, "A", 3.0, vec![]);
        let b = item(2, "B", 2.0, vec![]);
        let c = item(3, "C", 3.0, vec![]);
        let unknown = item(4, "D", 999.0, vec![]);

        let mut list = vec![&a, &unknown, &b, &c];
        sorted(SortOrder::PatchAsc, &mut list);
        assert_eq!(ids(&list), vec![2, 1, 3, 4]);

        let mut list = vec![&a, &unknown, &b, &c];
        sorted(SortOrder::PatchDesc, &mut list);
        assert_eq!(ids(&list), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_id_order() {
        let a = item(30, "A", 3.0, vec![]);
        let b = item(10, "B", 2.0, vec![]);
        let mut list = vec![&a, &b];
        sorted(SortOrder::Id, &mut list);
        assert_eq!(ids(&list), vec![10, 30]);
    }

    #[test]
    fn test_labels() {
        assert_eq!("patch-desc".parse::<SortOrder>().unwrap(), SortOrder::PatchDesc);
        assert!("newest".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::from_label_or_default("newest"), SortOrder::Name);
        assert_eq!(SortOrder::Id.next(), SortOrder::Name);
    }
}
