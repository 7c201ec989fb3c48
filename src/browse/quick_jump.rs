//! Cross-collection name search

use crate::catalog::{Catalog, Item};

/// Default cap on quick-jump results
pub const DEFAULT_QUICK_JUMP_LIMIT: usize = 20;

/// A name match and the collection it lives in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickJumpHit<'a> {
    pub collection: &'a str,
    pub item: &'a Item,
}

/// Find items whose name contains `query`, ignoring case
///
/// The query is matched as given, spaces included. Collections are scanned
/// in dataset order and scanning stops once `limit` hits are found. An empty
/// query finds nothing.
#[must_use]
pub fn quick_jump<'a>(catalog: &'a Catalog, query: &str, limit: usize) -> Vec<QuickJumpHit<'a>> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .collections()
        .iter()
        .flat_map(|collection| {
            collection.items.iter().map(move |item| QuickJumpHit {
                collection: &collection.name,
                item,
            })
        })
        .filter(|hit| hit.item.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;

    #[test]
    fn test_matches_across_collections_in_dataset_order() {
        let catalog = sample_catalog();
        let hits = quick_jump(&catalog, "chocobo", 20);
        let found: Vec<(&str, u32)> = hits.iter().map(|h| (h.collection, h.item.id)).collect();
        assert_eq!(found, vec![("Minions", 11), ("Mounts", 1), ("Mounts", 2)]);
    }

    #[test]
    fn test_limit_stops_scan() {
        let catalog = sample_catalog();
        let hits = quick_jump(&catalog, "CHOCOBO", 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_spaces_are_part_of_the_query() {
        let catalog = sample_catalog();
        let hits = quick_jump(&catalog, "fat ", 20);
        assert_eq!(hits.len(), 1);
        assert!(quick_jump(&catalog, "fat  ", 20).is_empty());
    }

    #[test]
    fn test_description_is_not_searched() {
        let catalog = sample_catalog();
        assert!(quick_jump(&catalog, "", 20).is_empty());
        assert!(quick_jump(&catalog, "loyal", 20).is_empty());
    }
}
