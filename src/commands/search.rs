//! Search command - quick-jump search across every collection

use crate::browse::{QuickJumpHit, quick_jump};
use crate::catalog::Catalog;
use crate::config::CollectrConfig;
use crate::output::{self, ItemSummary, OutputFormat};
use crate::CollectrError;
use colored::Colorize;
use std::io::{self, Write};

type Result<T> = std::result::Result<T, CollectrError>;

/// Run a quick-jump search with the configured minimum query length
///
/// # Errors
///
/// Returns `CollectrError::InvalidInput` if the query is shorter than
/// `min_query_len` characters.
pub fn find<'a>(catalog: &'a Catalog, query: &str, limit: usize, min_query_len: usize) -> Result<Vec<QuickJumpHit<'a>>> {
    if query.chars().count() < min_query_len {
        return Err(CollectrError::InvalidInput(format!(
            "Search query must be at least {min_query_len} characters"
        )));
    }
    Ok(quick_jump(catalog, query, limit))
}

/// Execute the search command
///
/// # Errors
///
/// Returns an error if the query is too short or output cannot be written.
pub fn execute(
    catalog: &Catalog,
    query: &str,
    limit: Option<usize>,
    format: OutputFormat,
    config: &CollectrConfig,
    quiet: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(config.quick_jump_limit);
    let hits = find(catalog, query, limit, config.min_query_len)?;
    tracing::debug!(query, hits = hits.len(), "search finished");

    match format {
        OutputFormat::Json | OutputFormat::Csv => {
            let rows: Vec<ItemSummary> = hits.iter().map(ItemSummary::from).collect();
            if format == OutputFormat::Json {
                output::write_json(&mut io::stdout().lock(), &rows)?;
            } else {
                output::write_csv(io::stdout().lock(), &rows)?;
            }
        }
        OutputFormat::Text => {
            let mut out = io::stdout().lock();
            if hits.is_empty() {
                if !quiet {
                    writeln!(out, "No items found matching '{}'.", query.trim())?;
                }
                return Ok(());
            }
            if !quiet {
                writeln!(out, "Items matching '{}':", query.trim())?;
            }
            for hit in &hits {
                if quiet {
                    writeln!(out, "{}\t{}\t{}", hit.item.id, hit.item.display_name(), hit.collection)?;
                } else {
                    writeln!(
                        out,
                        "  {:>6}  {}  {}",
                        hit.item.id.to_string().dimmed(),
                        hit.item.display_name().bold(),
                        hit.collection.cyan()
                    )?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;

    #[test]
    fn test_find_across_collections() {
        let catalog = sample_catalog();
        let hits = find(&catalog, "chocobo", 20, 2).unwrap();
        let ids: Vec<u32> = hits.iter().map(|h| h.item.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&1) && ids.contains(&2) && ids.contains(&11));
    }

    #[test]
    fn test_find_respects_limit() {
        let catalog = sample_catalog();
        assert_eq!(find(&catalog, "chocobo", 1, 2).unwrap().len(), 1);
    }

    #[test]
    fn test_short_query_is_rejected() {
        let catalog = sample_catalog();
        assert!(matches!(find(&catalog, "c", 20, 2), Err(CollectrError::InvalidInput(_))));
    }

    #[test]
    fn test_padding_counts_toward_minimum_length() {
        let catalog = sample_catalog();
        let hits = find(&catalog, " c", 20, 2).unwrap();
        let ids: Vec<u32> = hits.iter().map(|h| h.item.id).collect();
        assert_eq!(ids, vec![10, 11, 1, 2]);
    }
}
