//! Collection tab strip

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Tabs, Widget},
};

/// One tab per visible collection with its item count
pub struct CollectionTabs<'a> {
    tabs: Vec<(&'a str, usize)>,
    active: usize,
    theme: &'a Theme,
}

impl<'a> CollectionTabs<'a> {
    #[must_use]
    pub const fn new(tabs: Vec<(&'a str, usize)>, active: usize, theme: &'a Theme) -> Self {
        Self { tabs, active, theme }
    }
}

impl Widget for CollectionTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<Line> = self
            .tabs
            .iter()
            .map(|(name, count)| Line::from(format!(" {name} ({count}) ")))
            .collect();

        Tabs::new(titles)
            .select(self.active)
            .style(self.theme.dimmed_style())
            .highlight_style(self.theme.active_tab_style())
            .divider("│")
            .render(area, buf);
    }
}
