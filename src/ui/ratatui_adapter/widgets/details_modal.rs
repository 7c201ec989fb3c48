//! Item detail overlay

use super::centered_rect;
use crate::browse::{ItemDetail, SourceView};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Modal showing the resolved detail of one item
pub struct DetailsModal<'a> {
    detail: &'a ItemDetail,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> DetailsModal<'a> {
    #[must_use]
    pub const fn new(detail: &'a ItemDetail, scroll: u16, theme: &'a Theme) -> Self {
        Self { detail, scroll, theme }
    }

    fn field(&self, label: &'static str, value: &'a str) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), self.theme.dimmed_style()),
            Span::raw(value),
        ])
    }

    fn source_lines(&self, source: &'a SourceView) -> Vec<Line<'a>> {
        let indent = |text: String| Line::from(Span::styled(format!("    {text}"), self.theme.dimmed_style()));
        match source {
            SourceView::Shop {
                costs,
                vendor,
                coordinates,
            } => {
                let prices: Vec<&str> = costs.iter().map(|c| c.label.as_str()).collect();
                let mut lines = vec![Line::from(vec![
                    Span::styled("  Shop ", self.theme.info_style()),
                    Span::raw(prices.join(", ")),
                ])];
                lines.extend(vendor.iter().map(|v| indent(v.clone())));
                lines.extend(coordinates.iter().map(|c| indent(c.clone())));
                lines
            }
            SourceView::General {
                name,
                type_label,
                location,
                npc,
                ..
            } => {
                let mut lines = vec![Line::from(vec![
                    Span::styled(format!("  {type_label} "), self.theme.info_style()),
                    Span::raw(name.as_str()),
                ])];
                lines.extend(location.iter().map(|l| indent(l.clone())));
                lines.extend(npc.iter().map(|n| indent(format!("NPC: {n}"))));
                lines
            }
            SourceView::Alternate {
                method_type,
                name,
                place,
            } => {
                let kind = method_type.as_deref().unwrap_or("Other");
                let mut lines = vec![Line::from(vec![
                    Span::styled(format!("  {kind} "), self.theme.info_style()),
                    Span::raw(name.as_str()),
                ])];
                lines.extend(place.iter().map(|p| indent(p.clone())));
                lines
            }
        }
    }

    fn build_content(&self) -> Vec<Line<'a>> {
        let detail = self.detail;
        let mut lines = vec![
            Line::styled(detail.title.as_str(), self.theme.normal_style().add_modifier(Modifier::BOLD)),
            Line::default(),
            self.field("Collection", &detail.collection),
            self.field("Patch", &detail.patch),
            self.field("Icon", &detail.icon_url),
        ];

        if !detail.description.is_empty() {
            lines.push(Line::default());
            lines.extend(detail.description.lines().map(Line::raw));
        }

        lines.push(Line::default());
        lines.push(Line::styled("Sources", self.theme.heading_style()));
        if detail.sources.is_empty() {
            lines.push(Line::styled("  No source data", self.theme.dimmed_style()));
        }
        for source in &detail.sources {
            lines.extend(self.source_lines(source));
        }
        lines
    }
}

impl Widget for DetailsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(70, 80, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(format!(" #{} ", self.detail.id))
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(modal_area, buf);
    }
}
