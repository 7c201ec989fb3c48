//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::state::Mode;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Tab", "ctrl+c")
    pub key: &'static str,
    /// Action description (e.g., "next collection")
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: Vec<KeyHint>,
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub fn new(mode: Mode, theme: &'a Theme) -> Self {
        Self {
            hints: Self::hints_for(mode),
            theme,
        }
    }

    /// Hints relevant to the given mode
    #[must_use]
    pub fn hints_for(mode: Mode) -> Vec<KeyHint> {
        match mode {
            Mode::Normal => vec![
                KeyHint::new("Tab", "collection"),
                KeyHint::new("/", "search"),
                KeyHint::new("f", "filters"),
                KeyHint::new("s", "sort"),
                KeyHint::new("Enter", "details"),
                KeyHint::new("m", "load more"),
                KeyHint::new("?", "help"),
                KeyHint::new("q", "quit"),
            ],
            Mode::Search => vec![
                KeyHint::new("Enter", "apply"),
                KeyHint::new("↓", "suggestions"),
                KeyHint::new("ctrl+u", "clear"),
                KeyHint::new("Esc", "done"),
            ],
            Mode::QuickJump => vec![
                KeyHint::new("↑↓", "choose"),
                KeyHint::new("Enter", "open"),
                KeyHint::new("Esc", "back"),
            ],
            Mode::Filters => vec![
                KeyHint::new("↑↓", "move"),
                KeyHint::new("Space", "toggle"),
                KeyHint::new("c", "clear all"),
                KeyHint::new("Esc", "close"),
            ],
            Mode::Detail => vec![KeyHint::new("↑↓", "scroll"), KeyHint::new("Esc", "close")],
            Mode::Help => vec![KeyHint::new("Esc", "close")],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key, self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
