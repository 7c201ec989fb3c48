//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    query: &'a str,
    /// Byte position of the cursor in the query
    cursor: usize,
    theme: &'a Theme,
    focused: bool,
    /// A debounced search has not been applied yet
    pending: bool,
}

impl<'a> SearchBar<'a> {
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            theme,
            focused: false,
            pending: false,
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };

        let title = if self.pending { " Search … " } else { " Search " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled("/", self.theme.dimmed_style()), Span::raw(" ")];

        if self.query.is_empty() && !self.focused {
            spans.push(Span::styled(
                "press / to search all collections",
                self.theme.dimmed_style(),
            ));
        } else if self.focused {
            let cursor = self.cursor.min(self.query.len());
            let (before, after) = self.query.split_at(cursor);
            spans.push(Span::raw(before));
            spans.push(Span::styled(
                "│",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
            spans.push(Span::raw(after));
        } else {
            spans.push(Span::raw(self.query));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
