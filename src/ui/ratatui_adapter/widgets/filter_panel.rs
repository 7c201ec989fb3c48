//! Filter panel listing categories, patch ranges, the no-source switch and sort

use crate::filters::FilterState;
use crate::sort::SortOrder;
use crate::ui::ratatui_adapter::state::FilterEntry;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

pub struct FilterPanel<'a> {
    entries: &'a [FilterEntry],
    filter: &'a FilterState,
    sort: SortOrder,
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterPanel<'a> {
    #[must_use]
    pub const fn new(
        entries: &'a [FilterEntry],
        filter: &'a FilterState,
        sort: SortOrder,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entries,
            filter,
            sort,
            cursor: 0,
            focused: false,
            theme,
        }
    }

    /// Highlight the entry under the cursor when the panel has focus
    #[must_use]
    pub const fn focused(mut self, focused: bool, cursor: usize) -> Self {
        self.focused = focused;
        self.cursor = cursor;
        self
    }

    fn entry_line(&self, entry: FilterEntry) -> Line<'a> {
        let (checked, label) = match entry {
            FilterEntry::Category(category) => {
                (self.filter.categories.contains(&category), category.label().to_string())
            }
            FilterEntry::Patch(range) => (self.filter.patches.contains(&range), range.label().to_string()),
            FilterEntry::ShowNoSource => (self.filter.show_no_source, "No source".to_string()),
            FilterEntry::Sort => {
                return Line::from(vec![
                    Span::styled("Sort: ", self.theme.dimmed_style()),
                    Span::styled(self.sort.label(), self.theme.info_style()),
                ]);
            }
        };

        let (mark, style) = if checked {
            ("[x] ", self.theme.checked_style())
        } else {
            ("[ ] ", self.theme.dimmed_style())
        };
        Line::from(vec![Span::styled(mark, style), Span::raw(label)])
    }

    /// Section headings are inserted before the first entry of each kind
    fn heading_for(previous: Option<FilterEntry>, entry: FilterEntry) -> Option<&'static str> {
        let same_kind = matches!(
            (previous, entry),
            (Some(FilterEntry::Category(_)), FilterEntry::Category(_))
                | (Some(FilterEntry::Patch(_)), FilterEntry::Patch(_))
        );
        if same_kind {
            return None;
        }
        match entry {
            FilterEntry::Category(_) => Some("Sources"),
            FilterEntry::Patch(_) => Some("Patches"),
            FilterEntry::ShowNoSource => Some("Other"),
            FilterEntry::Sort => None,
        }
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let title = if self.filter.has_active_filters() {
            " Filters * "
        } else {
            " Filters "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        // Flatten headings and entries, remembering the line of the cursor
        let mut lines: Vec<ListItem> = Vec::new();
        let mut cursor_line = 0;
        let mut previous = None;
        for (idx, &entry) in self.entries.iter().enumerate() {
            if let Some(heading) = Self::heading_for(previous, entry) {
                lines.push(ListItem::new(Line::styled(heading, self.theme.heading_style())));
            }
            previous = Some(entry);

            let line = ListItem::new(self.entry_line(entry));
            if self.focused && idx == self.cursor {
                cursor_line = lines.len();
                lines.push(line.style(self.theme.selected_style()));
            } else {
                lines.push(line);
            }
        }

        let height = inner.height as usize;
        let skip = (cursor_line + 1).saturating_sub(height);
        let visible: Vec<ListItem> = lines.into_iter().skip(skip).take(height).collect();
        List::new(visible).render(inner, buf);
    }
}
