//! Serde mirror of the dataset JSON
//!
//! Field names follow the PascalCase keys of the dataset. Everything that may
//! be absent is optional here; validation happens in the `TryFrom`
//! conversions into the types of [`super::types`].
//!
//! Collections and items are kept as untyped JSON at first so that one bad
//! record is rejected on its own instead of failing the whole document.
//! Numeric fields are wide (`i64`, `f64`) for the same reason and narrowed
//! during validation.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawDataset {
    #[serde(default)]
    pub collections: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawCollection {
    pub collection_name: String,
    #[serde(default)]
    pub order_key: f64,
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawItem {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon_id: Option<i64>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub patch_added: Option<f64>,
    #[serde(default)]
    pub display_patch: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<RawSource>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSource {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon_id: Option<i64>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub npc_name: Option<String>,
    #[serde(default)]
    pub costs: Option<Vec<RawCost>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawLocation {
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawCost {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub icon_url: Option<String>,
}
