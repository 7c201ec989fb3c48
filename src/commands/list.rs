//! List command - print one page of a collection

use crate::browse::{BrowseSession, CollectingSink, PageOutcome, PageProgress, SessionSettings};
use crate::catalog::{Catalog, Item};
use crate::cli::ListArgs;
use crate::config::CollectrConfig;
use crate::output::{self, ItemSummary, OutputFormat};
use crate::CollectrError;
use colored::Colorize;
use std::io::{self, Write};

type Result<T> = std::result::Result<T, CollectrError>;

/// A rendered page and the counts around it
#[derive(Debug)]
pub struct ListPage<'a> {
    pub collection: &'a str,
    pub page: u32,
    /// Items of the requested page only
    pub items: Vec<&'a Item>,
    /// The filters matched nothing at all
    pub empty: bool,
    pub progress: PageProgress,
}

/// Render page `args.page` of a collection through a browse session
///
/// Page N is the first page followed by N - 1 "load more" actions, so the
/// counts match what the browser would show after the same steps.
///
/// # Errors
///
/// Returns `CollectrError::InvalidInput` if the named collection does not
/// exist or has no items.
pub fn render_page<'a>(catalog: &'a Catalog, args: &ListArgs, config: &CollectrConfig) -> Result<ListPage<'a>> {
    let mut settings = SessionSettings::from(config);
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size as usize;
    }
    let page_size = settings.page_size.max(1);
    let sort = args.filters.sort.unwrap_or(settings.default_sort);
    let filter = args.filters.to_filter_state(settings.show_no_source);

    let mut session = BrowseSession::new(catalog, settings).with_state(filter, sort);
    if let Some(name) = &args.collection {
        if !session.tabs().iter().any(|c| &c.name == name) {
            return Err(CollectrError::InvalidInput(format!("Collection '{name}' not found")));
        }
        session = session.with_collection(name);
    }
    let collection = session
        .active_collection()
        .ok_or_else(|| CollectrError::InvalidInput("The dataset has no collections".to_string()))?;

    let mut sink = CollectingSink::default();
    session.start(&mut sink);
    for _ in 1..args.page {
        if session.load_more(&mut sink) == PageOutcome::Exhausted {
            break;
        }
    }

    let start = (args.page as usize - 1).saturating_mul(page_size);
    let items = sink.items.get(start..).map(<[_]>::to_vec).unwrap_or_default();

    Ok(ListPage {
        collection: &collection.name,
        page: args.page,
        items,
        empty: sink.empty,
        progress: sink.progress,
    })
}

/// Execute the list command
///
/// # Errors
///
/// Returns an error if the collection is unknown or output cannot be written.
pub fn execute(catalog: &Catalog, args: &ListArgs, config: &CollectrConfig, quiet: bool) -> Result<()> {
    let page = render_page(catalog, args, config)?;
    let stdout = io::stdout();

    match args.format {
        OutputFormat::Json => {
            let rows = summaries(&page);
            output::write_json(&mut stdout.lock(), &rows)?;
        }
        OutputFormat::Csv => {
            let rows = summaries(&page);
            output::write_csv(stdout.lock(), &rows)?;
        }
        OutputFormat::Text => print_text(&page, quiet)?,
    }
    Ok(())
}

fn summaries(page: &ListPage<'_>) -> Vec<ItemSummary> {
    page.items
        .iter()
        .map(|item| ItemSummary::new(page.collection, item))
        .collect()
}

fn print_text(page: &ListPage<'_>, quiet: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();

    if page.empty {
        if !quiet {
            writeln!(out, "No items match the current filters.")?;
        }
        return Ok(());
    }
    if page.items.is_empty() {
        if !quiet {
            writeln!(out, "No items on page {}.", page.page)?;
            writeln!(out, "{}", output::progress_line(&page.progress))?;
        }
        return Ok(());
    }

    if !quiet {
        writeln!(out, "{} {}", page.collection.bold(), format!("(page {})", page.page).dimmed())?;
    }
    for item in &page.items {
        writeln!(out, "{}", output::item_line(item, quiet))?;
    }
    if !quiet {
        writeln!(out, "{}", output::progress_line(&page.progress))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AltSourceIndex;
    use crate::cli::FilterArgs;
    use crate::testing::{numbered_collection, sample_catalog};

    fn args(collection: Option<&str>, page: u32) -> ListArgs {
        ListArgs {
            collection: collection.map(ToString::to_string),
            filters: FilterArgs::default(),
            page,
            page_size: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_pages_match_incremental_rendering() {
        let catalog = Catalog::new(vec![numbered_collection("Mounts", 1, 120)], AltSourceIndex::default());
        let config = CollectrConfig::default();

        let first = render_page(&catalog, &args(None, 1), &config).unwrap();
        assert_eq!(first.items.len(), 50);
        assert_eq!(first.progress.rendered, 50);

        let third = render_page(&catalog, &args(None, 3), &config).unwrap();
        assert_eq!(third.items.len(), 20);
        assert_eq!(third.items[0].id, 101);
        assert_eq!(third.progress.label(), "Showing 120 / 120 (120 total)");

        let fourth = render_page(&catalog, &args(None, 4), &config).unwrap();
        assert!(fourth.items.is_empty());
        assert!(!fourth.empty);
    }

    #[test]
    fn test_page_far_past_the_end_stops_at_exhaustion() {
        let catalog = Catalog::new(vec![numbered_collection("Mounts", 1, 120)], AltSourceIndex::default());
        let page = render_page(&catalog, &args(None, u32::MAX), &CollectrConfig::default()).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.page, u32::MAX);
        assert_eq!(page.progress.rendered, 120);
    }

    #[test]
    fn test_page_size_override() {
        let catalog = Catalog::new(vec![numbered_collection("Mounts", 1, 12)], AltSourceIndex::default());
        let mut list_args = args(None, 2);
        list_args.page_size = Some(5);
        let page = render_page(&catalog, &list_args, &CollectrConfig::default()).unwrap();
        let ids: Vec<u32> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_named_collection_and_filters() {
        let catalog = sample_catalog();
        let mut list_args = args(Some("Mounts"), 1);
        list_args.filters.show_no_source = true;
        list_args.filters.search = Some("cho".to_string());

        let page = render_page(&catalog, &list_args, &CollectrConfig::default()).unwrap();
        let names: Vec<&str> = page.items.iter().map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["Company Chocobo", "Fat Chocobo"]);
    }

    #[test]
    fn test_unknown_collection_is_an_error() {
        let catalog = sample_catalog();
        let err = render_page(&catalog, &args(Some("Barding"), 1), &CollectrConfig::default()).unwrap_err();
        assert!(matches!(err, CollectrError::InvalidInput(_)));
    }
}
