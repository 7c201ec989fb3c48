//! Item list widget for the rendered page of the active collection

use crate::ui::ratatui_adapter::state::{AppState, ItemRow};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Item list widget with a cursor indicator and a trailing "load more" line
pub struct ItemList<'a> {
    state: &'a AppState,
    theme: &'a Theme,
    title: String,
    focused: bool,
}

impl<'a> ItemList<'a> {
    #[must_use]
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        let title = format!(" Items ({}/{}) ", state.progress.filtered, state.progress.total);
        Self {
            state,
            theme,
            title,
            focused: false,
        }
    }

    /// Set custom title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_row(&self, row: &ItemRow, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(format!("{:>7} ", row.patch), self.theme.patch_style()),
            Span::styled(row.name.clone(), text_style),
        ];
        if row.source_count == 0 {
            spans.push(Span::styled("  (no source)", self.theme.dimmed_style()));
        }

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(self.theme.selected_style())
        } else {
            item
        }
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.state.empty {
            Paragraph::new(Line::styled("No items match the current filters", self.theme.dimmed_style()))
                .render(inner, buf);
            return;
        }

        let visible_height = inner.height as usize;
        let start = self.state.scroll_offset.min(self.state.rows.len());
        let end = (start + visible_height).min(self.state.rows.len());

        let mut items: Vec<ListItem> = self.state.rows[start..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| self.render_row(row, start + offset == self.state.cursor))
            .collect();

        if items.len() < visible_height
            && let Some(remaining) = self.state.progress.remaining_label()
        {
            items.push(ListItem::new(Line::styled(
                format!("  ↓ load more ({remaining})"),
                self.theme.info_style(),
            )));
        }

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::{PageProgress, RenderSink};
    use crate::testing::{item, numbered_collection};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_rows_and_load_more_line() {
        let collection = numbered_collection("Mounts", 1, 3);
        let items: Vec<_> = collection.items.iter().take(2).collect();
        let mut state = AppState::new();
        state.append(&items);
        state.set_progress(PageProgress {
            rendered: 2,
            filtered: 3,
            total: 3,
        });

        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        ItemList::new(&state, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Items (3/3)"));
        assert!(text.contains(&collection.items[0].name));
        assert!(text.contains("load more (1 remaining)"));
    }

    #[test]
    fn test_empty_state_message() {
        let mut state = AppState::new();
        state.show_empty();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        ItemList::new(&state, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No items match"));
    }

    #[test]
    fn test_sourceless_item_is_marked() {
        let lonely = item(7, "Lonely", 6.0, vec![]);
        let mut state = AppState::new();
        state.append(&[&lonely]);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        ItemList::new(&state, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("(no source)"));
    }
}
