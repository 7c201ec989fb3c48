//! Dataset loading and validation
//!
//! The raw serde records are converted once into validated catalog types.
//! Items that fail validation are skipped with a warning and recorded in the
//! catalog's [`LoadReport`](super::LoadReport).

use super::alt_sources::AltSourceIndex;
use super::error::CatalogError;
use super::raw::{RawCollection, RawCost, RawDataset, RawItem, RawLocation, RawSource};
use super::types::{
    Catalog, Collection, Cost, Item, Location, Patch, RejectedRecord, Source, SourceCategory,
    SourceType,
};
use crate::icon::IconRef;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Load the primary dataset and the optional alternate-source document
///
/// # Errors
///
/// Returns `CatalogError::Io` if the dataset cannot be read and
/// `CatalogError::Parse` if it is not valid JSON of the expected shape.
/// Problems with the alternate document never fail the load.
pub fn load_catalog(path: &Path, alt_path: Option<&Path>) -> Result<Catalog, CatalogError> {
    tracing::debug!(path = %path.display(), "reading dataset");

    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawDataset = serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let alt = AltSourceIndex::load_or_empty(alt_path);
    let catalog = build_catalog(raw, alt);

    let report = catalog.report();
    tracing::info!(
        collections = report.collections,
        items = report.items,
        rejected = report.rejected.len(),
        "dataset loaded"
    );
    Ok(catalog)
}

/// Build a catalog from an in-memory dataset document
///
/// # Errors
///
/// Returns `CatalogError::Json` if the document does not parse.
pub fn from_json_str(json: &str, alt: AltSourceIndex) -> Result<Catalog, CatalogError> {
    let raw: RawDataset = serde_json::from_str(json)?;
    Ok(build_catalog(raw, alt))
}

fn build_catalog(raw: RawDataset, alt: AltSourceIndex) -> Catalog {
    let mut rejected = Vec::new();
    let collections = raw
        .collections
        .into_iter()
        .filter_map(|value| {
            let name = value
                .get("CollectionName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match serde_json::from_value::<RawCollection>(value) {
                Ok(raw) => Some(convert_collection(raw, &mut rejected)),
                Err(e) => {
                    tracing::warn!(collection = %name, error = %e, "skipping collection");
                    rejected.push(RejectedRecord {
                        collection: name,
                        item_id: None,
                        reason: format!("invalid collection: {e}"),
                    });
                    None
                }
            }
        })
        .collect();

    Catalog::new(collections, alt).with_rejected(rejected)
}

/// The item id of an untyped record, when it is a valid id
fn record_id(value: &Value) -> Option<u32> {
    value
        .get("Id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
}

fn convert_collection(raw: RawCollection, rejected: &mut Vec<RejectedRecord>) -> Collection {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(raw.items.len());

    for value in raw.items {
        let id = record_id(&value);
        let result = serde_json::from_value::<RawItem>(value)
            .map_err(|e| CatalogError::InvalidRecord(e.to_string()))
            .and_then(Item::try_from)
            .and_then(|item| {
                if seen.insert(item.id) {
                    Ok(item)
                } else {
                    Err(CatalogError::InvalidRecord(format!("duplicate item id {}", item.id)))
                }
            });

        match result {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(collection = %raw.collection_name, id = ?id, error = %e, "skipping item");
                rejected.push(RejectedRecord {
                    collection: raw.collection_name.clone(),
                    item_id: id,
                    reason: e.to_string(),
                });
            }
        }
    }

    Collection {
        name: raw.collection_name,
        order_key: raw.order_key,
        items,
    }
}

/// Icon ids outside the valid range are treated as missing, not as bad records
fn icon_id(raw: Option<i64>) -> Option<u32> {
    raw.and_then(|id| u32::try_from(id).ok())
}

impl TryFrom<RawItem> for Item {
    type Error = CatalogError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let id = u32::try_from(raw.id)
            .map_err(|_| CatalogError::InvalidRecord(format!("invalid item id {}", raw.id)))?;

        let patch = match raw.patch_added {
            None => Patch::UNKNOWN,
            Some(value) => Patch::new(value).ok_or_else(|| {
                CatalogError::InvalidRecord(format!("invalid patch value {value}"))
            })?,
        };

        let sources = raw
            .sources
            .unwrap_or_default()
            .into_iter()
            .map(Source::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name: raw.name.unwrap_or_default(),
            icon: IconRef::from_parts(raw.icon_url, icon_id(raw.icon_id)),
            patch,
            display_patch: raw.display_patch,
            description: raw.description.unwrap_or_default(),
            sources,
        })
    }
}

impl TryFrom<RawSource> for Source {
    type Error = CatalogError;

    fn try_from(raw: RawSource) -> Result<Self, Self::Error> {
        let kind: SourceType = raw.kind.parse()?;
        let categories = raw
            .categories
            .unwrap_or_default()
            .iter()
            .map(|key| {
                key.parse::<SourceCategory>()
                    .map_err(|_| CatalogError::InvalidRecord(format!("unknown category '{key}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            name: raw.name.filter(|n| !n.is_empty()),
            icon: IconRef::from_parts(raw.icon_url, icon_id(raw.icon_id)),
            location: raw.location.and_then(Location::from_raw),
            npc_name: raw.npc_name.filter(|n| !n.is_empty()),
            costs: raw
                .costs
                .unwrap_or_default()
                .into_iter()
                .map(Cost::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            categories,
        })
    }
}

impl Location {
    fn from_raw(raw: RawLocation) -> Option<Self> {
        if raw.territory.is_none() && raw.x.is_none() && raw.y.is_none() {
            return None;
        }
        Some(Self {
            territory: raw.territory.unwrap_or_default(),
            x: raw.x.unwrap_or_default(),
            y: raw.y.unwrap_or_default(),
        })
    }
}

impl TryFrom<RawCost> for Cost {
    type Error = CatalogError;

    fn try_from(raw: RawCost) -> Result<Self, Self::Error> {
        let amount = u32::try_from(raw.amount)
            .map_err(|_| CatalogError::InvalidRecord(format!("invalid cost amount {}", raw.amount)))?;
        Ok(Self {
            item_name: raw.item_name.unwrap_or_default(),
            amount,
            icon: IconRef::from_parts(raw.icon_url, None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DATASET: &str = r#"{
        "Collections": [
            {
                "CollectionName": "Minions",
                "OrderKey": 2,
                "Items": [
                    {"Id": 1, "Name": "Wind-up Cursor", "IconId": 59401, "PatchAdded": 2.0,
                     "Description": "A cursor.<br>It moves.",
                     "Sources": [{"Type": "Shop", "Name": "Gil", "Categories": ["Gil"],
                                  "Location": {"Territory": "Ul'dah", "X": 10.2, "Y": 8.5},
                                  "NpcName": "Merchant",
                                  "Costs": [{"ItemName": "Gil", "Amount": 2000}]}]},
                    {"Id": 2, "Name": "Bad Type", "PatchAdded": 2.0,
                     "Sources": [{"Type": "Raid"}]},
                    {"Id": 1, "Name": "Duplicate", "PatchAdded": 2.0, "Sources": []}
                ]
            },
            {
                "CollectionName": "Mounts",
                "OrderKey": 1,
                "Items": [
                    {"Id": 5, "Name": "Company Chocobo", "PatchAdded": 2.1, "Sources": []},
                    {"Id": 6, "Name": "Mystery", "Sources": null},
                    {"Id": 7, "Name": "Negative", "PatchAdded": -1.0}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_json_str_validates_records() {
        let catalog = from_json_str(DATASET, AltSourceIndex::default()).unwrap();

        let minions = catalog.collection("Minions").unwrap();
        assert_eq!(minions.items.len(), 1);
        let cursor = &minions.items[0];
        assert_eq!(cursor.icon, IconRef::Id(59401));
        assert_eq!(cursor.sources[0].kind, SourceType::Shop);
        assert_eq!(cursor.sources[0].categories, vec![SourceCategory::Gil]);
        assert_eq!(cursor.sources[0].costs[0].amount, 2000);
        assert_eq!(cursor.sources[0].location.as_ref().unwrap().territory, "Ul'dah");

        let mounts = catalog.collection("Mounts").unwrap();
        assert_eq!(mounts.items.len(), 2);
        assert!(mounts.find_item(6).unwrap().patch.is_unknown());
        assert!(!mounts.find_item(6).unwrap().has_sources());

        let rejected = &catalog.report().rejected;
        assert_eq!(rejected.len(), 3);
        assert!(rejected.iter().any(|r| r.reason.contains("Raid")));
        assert!(rejected.iter().any(|r| r.reason.contains("duplicate")));
        assert!(rejected.iter().any(|r| r.item_id == Some(7)));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{DATASET}").unwrap();

        let catalog = load_catalog(file.path(), None).unwrap();
        let tabs: Vec<&str> = catalog.tabs().map(|c| c.name.as_str()).collect();
        assert_eq!(tabs, vec!["Mounts", "Minions"]);
        assert_eq!(catalog.item_count(), 3);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/collections.json"), None).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_catalog_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_catalog(file.path(), None).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_out_of_range_numbers_reject_only_their_item() {
        let json = r#"{"Collections": [{"CollectionName": "Mounts", "OrderKey": 1, "Items": [
            {"Id": -5, "Name": "Negative Id", "PatchAdded": 3.0},
            {"Id": 8, "Name": "Negative Cost", "PatchAdded": 3.0,
             "Sources": [{"Type": "Shop", "Costs": [{"ItemName": "Gil", "Amount": -1}]}]},
            {"Id": 9, "Name": "Bad Icon", "IconId": -3, "PatchAdded": 3.0},
            {"Id": 10, "Name": "Fine", "PatchAdded": 3.0}
        ]}]}"#;
        let catalog = from_json_str(json, AltSourceIndex::default()).unwrap();

        let mounts = catalog.collection("Mounts").unwrap();
        let ids: Vec<u32> = mounts.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![9, 10]);
        assert_eq!(mounts.find_item(9).unwrap().icon, IconRef::Missing);

        let rejected = &catalog.report().rejected;
        assert_eq!(rejected.len(), 2);
        assert!(rejected.iter().any(|r| r.item_id.is_none() && r.reason.contains("-5")));
        assert!(rejected.iter().any(|r| r.item_id == Some(8) && r.reason.contains("amount")));
    }

    #[test]
    fn test_fractional_order_keys_and_bad_collections() {
        let json = r#"{"Collections": [
            {"CollectionName": "Emotes", "OrderKey": 1.5, "Items": [{"Id": 1, "Name": "Wave"}]},
            {"CollectionName": "Mounts", "OrderKey": 1, "Items": [{"Id": 2, "Name": "Chocobo"}]},
            {"CollectionName": "Broken", "OrderKey": "first", "Items": []},
            {"OrderKey": 0, "Items": []}
        ]}"#;
        let catalog = from_json_str(json, AltSourceIndex::default()).unwrap();

        let tabs: Vec<&str> = catalog.tabs().map(|c| c.name.as_str()).collect();
        assert_eq!(tabs, vec!["Mounts", "Emotes"]);

        let rejected = &catalog.report().rejected;
        assert_eq!(rejected.len(), 2);
        assert!(rejected.iter().any(|r| r.collection == "Broken" && r.item_id.is_none()));
    }

    #[test]
    fn test_unknown_category_rejects_item() {
        let json = r#"{"Collections": [{"CollectionName": "Mounts", "Items": [
            {"Id": 1, "Name": "A", "PatchAdded": 3.0,
             "Sources": [{"Type": "Quest", "Categories": ["Fishing"]}]}
        ]}]}"#;
        let catalog = from_json_str(json, AltSourceIndex::default()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.report().rejected.len(), 1);
    }
}
