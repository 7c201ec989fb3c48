//! Read-only dataset accessor
//!
//! Collections, items and sources loaded once from the JSON dataset, plus the
//! optional alternate-source index.

pub mod alt_sources;
pub mod error;
pub mod loader;
mod raw;
pub mod types;

pub use alt_sources::{AltMethod, AltSource, AltSourceIndex};
pub use error::CatalogError;
pub use loader::{from_json_str, load_catalog};
pub use types::{
    Catalog, CategorySet, Collection, Cost, Item, LoadReport, Location, Patch, RejectedRecord,
    Source, SourceCategory, SourceType, UNKNOWN_PATCH,
};
