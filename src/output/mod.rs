//! Output formatting for CLI display
//!
//! Plain, JSON and CSV renderings of item lists, plus the colored text
//! layout of the detail view.

use crate::browse::{ItemDetail, PageProgress, QuickJumpHit, SourceView};
use crate::catalog::Item;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output format of list-style commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Flat row used for JSON and CSV output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub id: u32,
    pub name: String,
    pub patch: String,
    pub sources: usize,
    pub collection: String,
}

impl ItemSummary {
    #[must_use]
    pub fn new(collection: &str, item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.display_name().to_string(),
            patch: item.patch_display(),
            sources: item.sources.len(),
            collection: collection.to_string(),
        }
    }
}

impl From<&QuickJumpHit<'_>> for ItemSummary {
    fn from(hit: &QuickJumpHit<'_>) -> Self {
        Self::new(hit.collection, hit.item)
    }
}

/// Format an item as one list line
#[must_use]
pub fn item_line(item: &Item, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", item.id, item.display_name());
    }
    let sources = if item.has_sources() {
        format!("{} source(s)", item.sources.len()).normal()
    } else {
        "no source".dimmed()
    };
    format!(
        "  {:>6}  {}  {}  {}",
        item.id.to_string().dimmed(),
        item.display_name().bold(),
        format!("[{}]", item.patch_display()).cyan(),
        sources
    )
}

/// Count line printed under a list
#[must_use]
pub fn progress_line(progress: &PageProgress) -> String {
    match progress.remaining_label() {
        Some(remaining) => format!("{} · {}", progress.label(), remaining).dimmed().to_string(),
        None => progress.label().dimmed().to_string(),
    }
}

/// Write summaries as pretty JSON
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_json<W: Write>(writer: &mut W, rows: &[ItemSummary]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, rows)?;
    writeln!(writer)
}

/// Write summaries as CSV with a header row
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_csv<W: Write>(writer: W, rows: &[ItemSummary]) -> io::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row).map_err(io::Error::other)?;
    }
    csv.flush()
}

/// Colored multi-line rendering of an item detail
#[must_use]
pub fn detail_lines(detail: &ItemDetail) -> Vec<String> {
    let mut lines = vec![
        detail.title.bold().to_string(),
        format!("{} {}  {} {}", "Collection:".dimmed(), detail.collection, "Patch:".dimmed(), detail.patch),
        format!("{} {}", "Icon:".dimmed(), detail.icon_url),
    ];

    if !detail.description.is_empty() {
        lines.push(String::new());
        lines.extend(detail.description.lines().map(ToString::to_string));
    }

    lines.push(String::new());
    lines.push("Sources".underline().to_string());
    if detail.sources.is_empty() {
        lines.push(format!("  {}", "No source data".dimmed()));
    }
    for source in &detail.sources {
        lines.extend(source_lines(source));
    }
    lines
}

fn source_lines(source: &SourceView) -> Vec<String> {
    match source {
        SourceView::Shop { costs, vendor, coordinates } => {
            let prices: Vec<&str> = costs.iter().map(|c| c.label.as_str()).collect();
            let mut lines = vec![format!("  {} {}", "Shop".cyan(), prices.join(", "))];
            if let Some(vendor) = vendor {
                lines.push(format!("    {vendor}"));
            }
            if let Some(coordinates) = coordinates {
                lines.push(format!("    {coordinates}"));
            }
            lines
        }
        SourceView::General { name, type_label, location, npc, .. } => {
            let mut lines = vec![format!("  {} {}", type_label.cyan(), name)];
            if let Some(location) = location {
                lines.push(format!("    {location}"));
            }
            if let Some(npc) = npc {
                lines.push(format!("    NPC: {npc}"));
            }
            lines
        }
        SourceView::Alternate { method_type, name, place } => {
            let kind = method_type.as_deref().unwrap_or("Other");
            let mut lines = vec![format!("  {} {}", kind.cyan(), name)];
            if let Some(place) = place {
                lines.push(format!("    {place}"));
            }
            lines
        }
    }
}
