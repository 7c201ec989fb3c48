//! Testing utilities for collectr
//!
//! Builders for catalog fixtures so unit tests can describe items in one
//! line instead of writing JSON.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{
    AltSourceIndex, Catalog, Collection, Item, Patch, Source, SourceCategory, SourceType,
};
use crate::icon::IconRef;

/// Build an item with the given sources and no description
///
/// # Panics
/// Panics if `patch` is negative or not finite.
#[must_use]
pub fn item(id: u32, name: &str, patch: f64, sources: Vec<Source>) -> Item {
    Item {
        id,
        name: name.to_string(),
        icon: IconRef::Id(id),
        patch: Patch::new(patch).expect("fixture patch is valid"),
        display_patch: None,
        description: String::new(),
        sources,
    }
}

/// Build a bare source of the given type carrying the given categories
#[must_use]
pub fn source(kind: SourceType, categories: &[SourceCategory]) -> Source {
    Source {
        kind,
        name: None,
        icon: IconRef::Missing,
        location: None,
        npc_name: None,
        costs: Vec::new(),
        categories: categories.to_vec(),
    }
}

#[must_use]
pub fn collection(name: &str, order_key: impl Into<f64>, items: Vec<Item>) -> Collection {
    Collection {
        name: name.to_string(),
        order_key: order_key.into(),
        items,
    }
}

/// A collection of `count` sourced items named `Item 0001`, `Item 0002`, ...
#[must_use]
pub fn numbered_collection(name: &str, order_key: impl Into<f64>, count: u32) -> Collection {
    let items = (1..=count)
        .map(|id| item(id, &format!("Item {id:04}"), 2.0, vec![source(SourceType::Shop, &[SourceCategory::Gil])]))
        .collect();
    collection(name, order_key, items)
}

/// A small two-collection catalog used across session and UI tests
#[must_use]
pub fn sample_catalog() -> Catalog {
    let mounts = collection(
        "Mounts",
        1,
        vec![
            item(1, "Company Chocobo", 2.1, vec![]),
            item(2, "Fat Chocobo", 2.2, vec![source(SourceType::MogStation, &[SourceCategory::MogStation])]),
            item(3, "Cactuar", 5.0, vec![source(SourceType::Achievement, &[SourceCategory::Achievement])]),
            item(4, "Ixion", 6.3, vec![source(SourceType::Monster, &[SourceCategory::HuntSeals])]),
        ],
    );
    let minions = collection(
        "Minions",
        2,
        vec![
            item(10, "Wind-up Cursor", 2.0, vec![source(SourceType::Shop, &[SourceCategory::Gil])]),
            item(11, "Baby Chocobo", 3.1, vec![source(SourceType::Quest, &[SourceCategory::Quest])]),
            item(12, "Mystery Egg", 999.0, vec![source(SourceType::Misc, &[])]),
        ],
    );
    Catalog::new(vec![minions, mounts], AltSourceIndex::default())
}
