//! Validated catalog types
//!
//! These are built once by the loader from the raw JSON records and are
//! read-only for the rest of the session.

use crate::catalog::alt_sources::{AltSource, AltSourceIndex};
use crate::catalog::error::CatalogError;
use crate::filters::FilterError;
use crate::icon::IconRef;
use crate::text::UNNAMED;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Patch value at or above which the version is unknown
pub const UNKNOWN_PATCH: f64 = 999.0;

/// Game version an item was added in
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Patch(f64);

impl Patch {
    /// Sentinel for items whose version is unknown
    pub const UNKNOWN: Self = Self(UNKNOWN_PATCH);

    /// Create a patch value, rejecting negative and non-finite numbers
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    /// Raw numeric value
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether this is the unknown sentinel (any value >= 999)
    #[must_use]
    pub fn is_unknown(self) -> bool {
        self.0 >= UNKNOWN_PATCH
    }

    /// Total numeric order; unknown values sort with other large numbers
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "Unknown")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// How an item is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Shop,
    Instance,
    Quest,
    Achievement,
    Crafting,
    Event,
    MogStation,
    Container,
    Submarine,
    PvPSeries,
    PvPRanking,
    Monster,
    Misc,
    Npc,
}

impl SourceType {
    /// Every source type, in display order
    pub const ALL: [Self; 14] = [
        Self::Shop,
        Self::Instance,
        Self::Quest,
        Self::Achievement,
        Self::Crafting,
        Self::Event,
        Self::MogStation,
        Self::Container,
        Self::Submarine,
        Self::PvPSeries,
        Self::PvPRanking,
        Self::Monster,
        Self::Misc,
        Self::Npc,
    ];

    /// Tag used in the dataset
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shop => "Shop",
            Self::Instance => "Instance",
            Self::Quest => "Quest",
            Self::Achievement => "Achievement",
            Self::Crafting => "Crafting",
            Self::Event => "Event",
            Self::MogStation => "MogStation",
            Self::Container => "Container",
            Self::Submarine => "Submarine",
            Self::PvPSeries => "PvPSeries",
            Self::PvPRanking => "PvPRanking",
            Self::Monster => "Monster",
            Self::Misc => "Misc",
            Self::Npc => "Npc",
        }
    }

    /// Short label shown next to a source
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shop => "Shop",
            Self::Instance => "Duty",
            Self::Quest => "Quest",
            Self::Achievement => "Achievement",
            Self::Crafting => "Crafting",
            Self::Event => "Event",
            Self::MogStation => "Mog Station",
            Self::Container => "Container",
            Self::Submarine => "Voyage",
            Self::PvPSeries | Self::PvPRanking => "PvP",
            Self::Monster => "Monster",
            Self::Misc => "Other",
            Self::Npc => "NPC",
        }
    }

    /// Icon id used when the source carries no icon of its own
    #[must_use]
    pub const fn icon_id(self) -> u32 {
        match self {
            Self::Shop => 65002,
            Self::Quest => 61419,
            Self::Achievement => 6,
            Self::Crafting => 62202,
            Self::Event => 61757,
            Self::MogStation => 61831,
            Self::Container => 60465,
            Self::Submarine => 65035,
            Self::PvPSeries => 61806,
            Self::PvPRanking => 9058,
            Self::Monster => 63003,
            Self::Instance | Self::Misc | Self::Npc => 60414,
        }
    }
}

impl FromStr for SourceType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidRecord(format!("unknown source type '{s}'")))
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse acquisition class used by the category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceCategory {
    Gil,
    Scrips,
    Mgp,
    PvP,
    Duty,
    Quest,
    Event,
    Tomestones,
    DeepDungeon,
    BeastTribes,
    MogStation,
    Achievement,
    CompanySeals,
    IslandSanctuary,
    HuntSeals,
    TreasureHunts,
    Crafting,
    Voyages,
}

impl SourceCategory {
    /// Every category, in filter panel order
    pub const ALL: [Self; 18] = [
        Self::Gil,
        Self::Scrips,
        Self::Mgp,
        Self::PvP,
        Self::Duty,
        Self::Quest,
        Self::Event,
        Self::Tomestones,
        Self::DeepDungeon,
        Self::BeastTribes,
        Self::MogStation,
        Self::Achievement,
        Self::CompanySeals,
        Self::IslandSanctuary,
        Self::HuntSeals,
        Self::TreasureHunts,
        Self::Crafting,
        Self::Voyages,
    ];

    /// Key used in the dataset and on the command line
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gil => "Gil",
            Self::Scrips => "Scrips",
            Self::Mgp => "MGP",
            Self::PvP => "PvP",
            Self::Duty => "Duty",
            Self::Quest => "Quest",
            Self::Event => "Event",
            Self::Tomestones => "Tomestones",
            Self::DeepDungeon => "DeepDungeon",
            Self::BeastTribes => "BeastTribes",
            Self::MogStation => "MogStation",
            Self::Achievement => "Achievement",
            Self::CompanySeals => "CompanySeals",
            Self::IslandSanctuary => "IslandSanctuary",
            Self::HuntSeals => "HuntSeals",
            Self::TreasureHunts => "TreasureHunts",
            Self::Crafting => "Crafting",
            Self::Voyages => "Voyages",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gil => "Gil",
            Self::Scrips => "Scrips",
            Self::Mgp => "MGP",
            Self::PvP => "PvP",
            Self::Duty => "Duties",
            Self::Quest => "Quests",
            Self::Event => "Events",
            Self::Tomestones => "Tomestones",
            Self::DeepDungeon => "Deep Dungeons",
            Self::BeastTribes => "Beast Tribes",
            Self::MogStation => "Mog Station",
            Self::Achievement => "Achievements",
            Self::CompanySeals => "Company Seals",
            Self::IslandSanctuary => "Island Sanctuary",
            Self::HuntSeals => "Hunts",
            Self::TreasureHunts => "Treasure Hunts",
            Self::Crafting => "Crafting",
            Self::Voyages => "Voyages",
        }
    }

    /// Icon id shown next to the category
    #[must_use]
    pub const fn icon_id(self) -> u32 {
        match self {
            Self::Gil => 65002,
            Self::Scrips => 65028,
            Self::Mgp => 65025,
            Self::PvP => 61806,
            Self::Duty => 60414,
            Self::Quest => 61419,
            Self::Event => 61757,
            Self::Tomestones => 65086,
            Self::DeepDungeon => 61824,
            Self::BeastTribes => 65016,
            Self::MogStation => 61831,
            Self::Achievement => 6,
            Self::CompanySeals => 65005,
            Self::IslandSanctuary => 65096,
            Self::HuntSeals => 65034,
            Self::TreasureHunts => 115,
            Self::Crafting => 62202,
            Self::Voyages => 65035,
        }
    }
}

impl FromStr for SourceCategory {
    type Err = FilterError;

    /// Parse a category key, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Place on a map
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub territory: String,
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}, {:.1})", self.territory, self.x, self.y)
    }
}

/// One entry of a shop price
#[derive(Debug, Clone, PartialEq)]
pub struct Cost {
    pub item_name: String,
    pub amount: u32,
    pub icon: IconRef,
}

/// A way to obtain an item
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub kind: SourceType,
    pub name: Option<String>,
    pub icon: IconRef,
    pub location: Option<Location>,
    pub npc_name: Option<String>,
    pub costs: Vec<Cost>,
    pub categories: Vec<SourceCategory>,
}

impl Source {
    /// Whether the source carries any of the given category tags
    #[must_use]
    pub fn has_any_category(&self, wanted: &impl CategorySet) -> bool {
        self.categories.iter().any(|c| wanted.contains_category(*c))
    }
}

/// Anything that can answer category membership
///
/// Lets the filter pass its `BTreeSet` while tests use a `HashSet`.
pub trait CategorySet {
    fn contains_category(&self, category: SourceCategory) -> bool;
}

impl CategorySet for std::collections::BTreeSet<SourceCategory> {
    fn contains_category(&self, category: SourceCategory) -> bool {
        self.contains(&category)
    }
}

impl CategorySet for HashSet<SourceCategory> {
    fn contains_category(&self, category: SourceCategory) -> bool {
        self.contains(&category)
    }
}

/// A collectible
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub icon: IconRef,
    pub patch: Patch,
    /// Version string from the dataset that overrides the numeric display
    pub display_patch: Option<String>,
    pub description: String,
    pub sources: Vec<Source>,
}

impl Item {
    /// Name to display, `???` when the dataset has none
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { UNNAMED } else { &self.name }
    }

    /// Version to display
    #[must_use]
    pub fn patch_display(&self) -> String {
        self.display_patch
            .as_ref()
            .filter(|p| !p.is_empty())
            .map_or_else(|| self.patch.to_string(), Clone::clone)
    }

    /// Whether the item has at least one source
    #[must_use]
    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// Named group of items of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub name: String,
    /// Tab position; any JSON number, compared numerically
    pub order_key: f64,
    pub items: Vec<Item>,
}

impl Collection {
    /// Find an item by id
    #[must_use]
    pub fn find_item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// A record that was rejected while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub collection: String,
    pub item_id: Option<u32>,
    pub reason: String,
}

/// Summary of a dataset load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub collections: usize,
    pub items: usize,
    pub rejected: Vec<RejectedRecord>,
    pub alt_sources: usize,
}

/// The whole loaded dataset
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Collections in dataset order
    collections: Vec<Collection>,
    /// Indices of non-empty collections sorted by order key
    tab_order: Vec<usize>,
    alt_sources: AltSourceIndex,
    report: LoadReport,
}

impl Catalog {
    /// Build a catalog from validated collections
    #[must_use]
    pub fn new(collections: Vec<Collection>, alt_sources: AltSourceIndex) -> Self {
        let mut tab_order: Vec<usize> = collections
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.items.is_empty())
            .map(|(idx, _)| idx)
            .collect();
        // stable: equal keys keep dataset order
        tab_order.sort_by(|&a, &b| collections[a].order_key.total_cmp(&collections[b].order_key));

        let report = LoadReport {
            collections: collections.len(),
            items: collections.iter().map(|c| c.items.len()).sum(),
            rejected: Vec::new(),
            alt_sources: alt_sources.len(),
        };

        Self {
            collections,
            tab_order,
            alt_sources,
            report,
        }
    }

    /// Attach the rejected records found by the loader
    #[must_use]
    pub fn with_rejected(mut self, rejected: Vec<RejectedRecord>) -> Self {
        self.report.rejected = rejected;
        self
    }

    /// All collections, in dataset order
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Non-empty collections ordered by their order key
    pub fn tabs(&self) -> impl Iterator<Item = &Collection> {
        self.tab_order.iter().map(|&idx| &self.collections[idx])
    }

    /// Look up a collection by name
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Find an item by id within a named collection
    #[must_use]
    pub fn find_item(&self, collection: &str, id: u32) -> Option<&Item> {
        self.collection(collection)?.find_item(id)
    }

    /// Find the first item with the id in any collection, in tab order
    #[must_use]
    pub fn find_item_anywhere(&self, id: u32) -> Option<(&Collection, &Item)> {
        self.tabs()
            .find_map(|collection| collection.find_item(id).map(|item| (collection, item)))
    }

    /// Alternate source annotation for an item, if any
    #[must_use]
    pub fn alt_source(&self, item_id: u32) -> Option<&AltSource> {
        self.alt_sources.get(item_id)
    }

    /// Total number of items across all collections
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.report.items
    }

    /// Whether the catalog holds no items at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tab_order.is_empty()
    }

    /// Load summary
    #[must_use]
    pub const fn report(&self) -> &LoadReport {
        &self.report
    }
}
