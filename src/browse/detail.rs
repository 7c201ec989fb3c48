//! Item detail view model
//!
//! Everything the detail overlay and the `show` command display, resolved
//! to plain strings: cleaned description, icon URLs with fallback and the
//! source list (alternate methods take precedence over primary sources).

use crate::catalog::{AltSource, Item, Source, SourceType};
use crate::icon::{IconRef, icon_url};
use crate::text::{UNNAMED, clean_description, currency_icon_id, translate_source_name};
use serde::Serialize;

const UNKNOWN_NPC: &str = "Unknown NPC";
const UNKNOWN_LOCATION: &str = "Unknown location";

/// A shop price entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostView {
    /// `Wolf Mark x400`
    pub label: String,
    pub icon_url: String,
}

/// One rendered acquisition method
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceView {
    /// Shop source listing its price
    Shop {
        costs: Vec<CostView>,
        /// `at Vendor, Territory`
        vendor: Option<String>,
        coordinates: Option<String>,
    },
    /// Any other primary source
    General {
        name: String,
        type_label: String,
        icon_url: String,
        location: Option<String>,
        npc: Option<String>,
    },
    /// Method from the alternate-source document
    Alternate {
        method_type: Option<String>,
        name: String,
        place: Option<String>,
    },
}

impl SourceView {
    fn from_source(source: &Source, icon_base: &str) -> Self {
        if source.kind == SourceType::Shop && !source.costs.is_empty() {
            return Self::shop(source, icon_base);
        }

        let icon = match &source.icon {
            IconRef::Missing => icon_url(icon_base, source.kind.icon_id()),
            icon => icon.resolve(icon_base),
        };

        Self::General {
            name: translate_source_name(source.name.as_deref()),
            type_label: source.kind.label().to_string(),
            icon_url: icon,
            location: source.location.as_ref().map(ToString::to_string),
            npc: source.npc_name.clone(),
        }
    }

    fn shop(source: &Source, icon_base: &str) -> Self {
        let costs = source
            .costs
            .iter()
            .map(|cost| {
                let name = if cost.item_name.is_empty() { UNNAMED } else { &cost.item_name };
                let icon_url = match &cost.icon {
                    IconRef::Missing => icon_url(icon_base, currency_icon_id(&cost.item_name)),
                    icon => icon.resolve(icon_base),
                };
                CostView {
                    label: format!("{name} x{}", cost.amount),
                    icon_url,
                }
            })
            .collect();

        let vendor = (source.npc_name.is_some() || source.location.is_some()).then(|| {
            let npc = source.npc_name.as_deref().unwrap_or(UNKNOWN_NPC);
            let territory = source
                .location
                .as_ref()
                .map(|l| l.territory.as_str())
                .filter(|t| !t.is_empty())
                .unwrap_or(UNKNOWN_LOCATION);
            format!("at {npc}, {territory}")
        });

        Self::Shop {
            costs,
            vendor,
            coordinates: source
                .location
                .as_ref()
                .map(|l| format!("({:.1}, {:.1})", l.x, l.y)),
        }
    }
}

/// Resolved detail of one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub id: u32,
    pub collection: String,
    /// Display name, prefixed with the alternate number when there is one
    pub title: String,
    pub patch: String,
    pub description: String,
    pub icon_url: String,
    /// Empty when the item has no sources at all
    pub sources: Vec<SourceView>,
}

impl ItemDetail {
    /// Resolve an item for display
    #[must_use]
    pub fn build(collection: &str, item: &Item, alt: Option<&AltSource>, icon_base: &str) -> Self {
        let title = match alt {
            Some(AltSource { number: Some(no), .. }) => format!("No.{no} {}", item.display_name()),
            _ => item.display_name().to_string(),
        };

        let sources = match alt {
            Some(entry) if !entry.methods.is_empty() => entry
                .methods
                .iter()
                .map(|method| SourceView::Alternate {
                    method_type: method.kind.clone(),
                    name: translate_source_name(method.name.as_deref()),
                    place: method.place.clone().filter(|p| !p.is_empty()),
                })
                .collect(),
            _ => item
                .sources
                .iter()
                .map(|source| SourceView::from_source(source, icon_base))
                .collect(),
        };

        Self {
            id: item.id,
            collection: collection.to_string(),
            title,
            patch: item.patch_display(),
            description: clean_description(&item.description),
            icon_url: item.icon.resolve(icon_base),
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AltMethod, Cost, Location, SourceCategory};
    use crate::icon::DEFAULT_ICON_BASE_URL;
    use crate::testing::{item, source};

    #[test]
    fn test_shop_source_lists_costs() {
        let mut shop = source(SourceType::Shop, &[SourceCategory::PvP]);
        shop.costs = vec![Cost {
            item_name: "Wolf Mark".into(),
            amount: 400,
            icon: IconRef::Missing,
        }];
        shop.location = Some(Location {
            territory: "Wolves' Den Pier".into(),
            x: 5.0,
            y: 6.3,
        });
        let it = item(1, "Wolf Whistle", 2.0, vec![shop]);

        let detail = ItemDetail::build("Mounts", &it, None, DEFAULT_ICON_BASE_URL);
        let SourceView::Shop { costs, vendor, coordinates } = &detail.sources[0] else {
            panic!("expected a shop source");
        };
        assert_eq!(costs[0].label, "Wolf Mark x400");
        assert_eq!(costs[0].icon_url, "https://xivapi.com/i/065000/065019.png");
        assert_eq!(vendor.as_deref(), Some("at Unknown NPC, Wolves' Den Pier"));
        assert_eq!(coordinates.as_deref(), Some("(5.0, 6.3)"));
    }

    #[test]
    fn test_general_source_uses_type_icon() {
        let mut quest = source(SourceType::Quest, &[]);
        quest.name = Some("Craftable".into());
        quest.npc_name = Some("Lalai".into());
        let it = item(2, "Thing", 3.0, vec![quest]);

        let detail = ItemDetail::build("Minions", &it, None, DEFAULT_ICON_BASE_URL);
        assert_eq!(
            detail.sources[0],
            SourceView::General {
                name: "Crafting".into(),
                type_label: "Quest".into(),
                icon_url: "https://xivapi.com/i/061000/061419.png".into(),
                location: None,
                npc: Some("Lalai".into()),
            }
        );
    }

    #[test]
    fn test_alternate_sources_take_precedence() {
        let it = item(3, "Hawk", 4.0, vec![source(SourceType::Instance, &[])]);
        let alt = AltSource {
            item_id: 3,
            number: Some(12),
            methods: vec![AltMethod {
                kind: Some("Duty".into()),
                name: Some("The Vault".into()),
                place: None,
            }],
        };

        let detail = ItemDetail::build("Minions", &it, Some(&alt), DEFAULT_ICON_BASE_URL);
        assert_eq!(detail.title, "No.12 Hawk");
        assert_eq!(detail.sources.len(), 1);
        assert!(matches!(&detail.sources[0], SourceView::Alternate { name, .. } if name == "The Vault"));
    }

    #[test]
    fn test_no_sources_and_cleanup() {
        let mut it = item(4, "", 999.0, vec![]);
        it.description = "\u{E040}First line<br/>second ".into();

        let detail = ItemDetail::build("Mounts", &it, None, DEFAULT_ICON_BASE_URL);
        assert_eq!(detail.title, "???");
        assert_eq!(detail.patch, "Unknown");
        assert_eq!(detail.description, "First line\nsecond");
        assert!(detail.sources.is_empty());
        assert_eq!(detail.icon_url, "https://xivapi.com/i/000000/000004.png");
    }
}
