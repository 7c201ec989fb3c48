//! Ratatui widgets for the browser TUI

mod collection_tabs;
mod details_modal;
mod filter_panel;
mod help_bar;
mod help_overlay;
mod item_list;
mod quick_jump;
mod search_bar;
mod status_bar;

pub use collection_tabs::CollectionTabs;
pub use details_modal::DetailsModal;
pub use filter_panel::FilterPanel;
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use item_list::ItemList;
pub use quick_jump::QuickJumpPopup;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Centered area taking the given percentages of `area`
pub(crate) fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let width_percent = width_percent.min(100);
    let height_percent = height_percent.min(100);
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(popup_layout[1])[1]
}
