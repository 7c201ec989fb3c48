//! Vocabulary commands - collections, categories, patch ranges and icons

use crate::catalog::{Catalog, SourceCategory};
use crate::filters::PatchRange;
use crate::icon::icon_url;
use crate::ui::output::{OutputWriter, StdoutWriter};
use colored::Colorize;

/// Print collections in tab order with their item counts
pub fn collections(catalog: &Catalog, quiet: bool) {
    let output = StdoutWriter::new(quiet);

    if catalog.is_empty() {
        output.info("No collections found in the dataset.");
        return;
    }

    output.info("Collections:");
    for collection in catalog.tabs() {
        if quiet {
            output.write(&format!("{}\t{}", collection.name, collection.items.len()));
        } else {
            output.write(&format!(
                "  {} {}",
                collection.name.bold(),
                format!("({} items)", collection.items.len()).dimmed()
            ));
        }
    }

    let report = catalog.report();
    if report.alt_sources > 0 {
        output.info(&format!("{} alternate source entries", report.alt_sources));
    }
    if !report.rejected.is_empty() {
        output.warning(&format!(
            "{} malformed record(s) were skipped; run with -v for details",
            report.rejected.len()
        ));
    }
}

/// Print the source categories accepted by `--category`
pub fn categories(quiet: bool) {
    let output = StdoutWriter::new(quiet);
    output.info("Source categories:");
    for category in SourceCategory::ALL {
        if quiet {
            output.write(category.key());
        } else {
            output.write(&format!("  {:<16} {}", category.key(), category.label().dimmed()));
        }
    }
}

/// Print the patch ranges accepted by `--patch`
pub fn patches(quiet: bool) {
    let output = StdoutWriter::new(quiet);
    output.info("Patch ranges:");
    for range in PatchRange::ALL {
        if quiet {
            output.write(range.label());
        } else {
            let (min, max) = range.bounds();
            output.write(&format!("  {:<8} {}", range.label(), format!("{min:.2} - {max:.2}").dimmed()));
        }
    }
}

/// Print the retrieval URL of an icon id
pub fn icon(id: u32, base_url: &str) {
    StdoutWriter::new(true).write(&icon_url(base_url, id));
}
