//! Show command - detail view of one item

use crate::browse::ItemDetail;
use crate::catalog::Catalog;
use crate::config::CollectrConfig;
use crate::output;
use crate::CollectrError;
use std::io::{self, Write};

type Result<T> = std::result::Result<T, CollectrError>;

/// Resolve the detail of item `id`
///
/// Without a collection name, the first collection in tab order holding the
/// id wins.
///
/// # Errors
///
/// Returns `CollectrError::InvalidInput` if the collection or item does not
/// exist.
pub fn find_detail(catalog: &Catalog, id: u32, collection: Option<&str>, icon_base_url: &str) -> Result<ItemDetail> {
    let (collection, item) = match collection {
        Some(name) => {
            let collection = catalog
                .collection(name)
                .ok_or_else(|| CollectrError::InvalidInput(format!("Collection '{name}' not found")))?;
            let item = collection
                .find_item(id)
                .ok_or_else(|| CollectrError::InvalidInput(format!("Item #{id} not found in {name}")))?;
            (collection, item)
        }
        None => catalog
            .find_item_anywhere(id)
            .ok_or_else(|| CollectrError::InvalidInput(format!("Item #{id} not found")))?,
    };

    Ok(ItemDetail::build(&collection.name, item, catalog.alt_source(id), icon_base_url))
}

/// Execute the show command
///
/// # Errors
///
/// Returns an error if the item cannot be found or output cannot be written.
pub fn execute(
    catalog: &Catalog,
    id: u32,
    collection: Option<&str>,
    json: bool,
    config: &CollectrConfig,
) -> Result<()> {
    let detail = find_detail(catalog, id, collection, &config.icon_base_url)?;
    let mut out = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &detail).map_err(io::Error::other)?;
        writeln!(out)?;
    } else {
        for line in output::detail_lines(&detail) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
