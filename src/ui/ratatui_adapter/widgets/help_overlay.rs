//! Help overlay widget for displaying full keybind reference

use super::centered_rect;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Help overlay widget that displays a centered help screen
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn section(&self, title: &'static str) -> [Line<'static>; 3] {
        [
            Line::default(),
            Line::styled(format!("  {title}"), self.theme.heading_style()),
            Line::default(),
        ]
    }

    fn help_line(&self, key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), self.theme.info_style()),
            Span::raw(desc),
        ])
    }

    fn build_content(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        lines.extend(self.section("Navigation"));
        lines.push(self.help_line("↑/↓ j/k", "Move cursor"));
        lines.push(self.help_line("PgUp/PgDn", "Page up/down"));
        lines.push(self.help_line("Home/End", "Jump to start/end"));
        lines.push(self.help_line("Tab/S-Tab", "Next/previous collection"));
        lines.push(self.help_line("m", "Load the next page"));
        lines.push(self.help_line("Enter", "Item details"));

        lines.extend(self.section("Search"));
        lines.push(self.help_line("/", "Search across collections"));
        lines.push(self.help_line("Enter or ↓", "Pick a suggestion"));
        lines.push(self.help_line("Ctrl+U", "Clear query"));
        lines.push(self.help_line("←/→", "Move cursor in query"));

        lines.extend(self.section("Filters"));
        lines.push(self.help_line("f", "Open the filter panel"));
        lines.push(self.help_line("Space", "Toggle entry"));
        lines.push(self.help_line("n", "Show/hide items without source"));
        lines.push(self.help_line("s", "Cycle sort order"));
        lines.push(self.help_line("c", "Clear all filters"));

        lines.push(Line::default());
        lines.push(self.help_line("q/Esc", "Quit"));
        lines.push(Line::default());
        lines.push(Line::styled("  Press any key to close", self.theme.dimmed_style()));
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_area = centered_rect(60, 80, area);
        Clear.render(overlay_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(" Help ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content())
            .block(block)
            .render(overlay_area, buf);
    }
}
