//! Status bar widget for page progress and messages

use crate::browse::PageProgress;
use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::state::StatusMessage;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget: latest message on the left, progress on the right
pub struct StatusBar<'a> {
    messages: &'a [&'a StatusMessage],
    progress: PageProgress,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(messages: &'a [&'a StatusMessage], progress: PageProgress, theme: &'a Theme) -> Self {
        Self {
            messages,
            progress,
            theme,
        }
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(inner);

        if let Some(msg) = self.messages.last() {
            let style = self.style_for_level(msg.level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(msg.level), style),
                Span::styled(msg.text.as_str(), style),
            ]);
            Paragraph::new(line).render(chunks[0], buf);
        }

        let mut spans = vec![Span::raw(self.progress.label())];
        if let Some(remaining) = self.progress.remaining_label() {
            spans.push(Span::styled(" · ", self.theme.dimmed_style()));
            spans.push(Span::styled(remaining, self.theme.info_style()));
        }
        Paragraph::new(Line::from(spans).right_aligned()).render(chunks[1], buf);
    }
}
