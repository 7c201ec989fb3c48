//! Quick-jump suggestion popup shown under the search bar

use crate::ui::ratatui_adapter::state::QuickJumpRow;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Widget},
};

pub struct QuickJumpPopup<'a> {
    rows: &'a [QuickJumpRow],
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QuickJumpPopup<'a> {
    #[must_use]
    pub const fn new(rows: &'a [QuickJumpRow], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            rows,
            cursor,
            focused: false,
            theme,
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Area below `anchor` tall enough for the rows, clipped to `bounds`
    #[must_use]
    pub fn area(&self, anchor: Rect, bounds: Rect) -> Rect {
        let wanted = u16::try_from(self.rows.len()).unwrap_or(u16::MAX).saturating_add(2);
        let y = anchor.y.saturating_add(anchor.height);
        let available = bounds.bottom().saturating_sub(y);
        Rect::new(anchor.x, y, anchor.width, wanted.min(available))
    }
}

impl Widget for QuickJumpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Jump to ({}) ", self.rows.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        let skip = (self.cursor + 1).saturating_sub(height);
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .skip(skip)
            .take(height)
            .map(|(idx, row)| {
                let line = Line::from(vec![
                    Span::raw(row.name.as_str()),
                    Span::styled(format!("  {}", row.collection), self.theme.dimmed_style()),
                ]);
                if self.focused && idx == self.cursor {
                    ListItem::new(line).style(self.theme.selected_style())
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: u32) -> Vec<QuickJumpRow> {
        (1..=count)
            .map(|id| QuickJumpRow {
                collection: "Mounts".to_string(),
                id,
                name: format!("Chocobo {id}"),
            })
            .collect()
    }

    #[test]
    fn test_area_is_clipped_to_bounds() {
        let rows = rows(20);
        let theme = Theme::default();
        let popup = QuickJumpPopup::new(&rows, 0, &theme);
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(0, 1, 80, 3);

        let area = popup.area(anchor, bounds);
        assert_eq!(area.y, 4);
        assert_eq!(area.height, 20);

        let short = rows[..2].to_vec();
        let popup = QuickJumpPopup::new(&short, 0, &theme);
        assert_eq!(popup.area(anchor, bounds).height, 4);
    }
}
