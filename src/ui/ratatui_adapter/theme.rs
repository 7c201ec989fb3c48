//! Color theme definitions for the ratatui TUI

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted row
    pub selection_bg: Color,
    /// Foreground color for the highlighted row
    pub selection_fg: Color,
    /// Cursor indicator and focused borders
    pub cursor: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    pub dimmed: Color,
    /// Active collection tab
    pub active_tab: Color,
    /// Patch version column
    pub patch: Color,
    /// Checked filter entries
    pub checked: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            active_tab: Color::Yellow,
            patch: Color::Magenta,
            checked: Color::Green,
        }
    }

    /// Style for the currently selected item
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.cursor).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border of the pane that has focus
    #[must_use]
    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.cursor)
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn active_tab_style(&self) -> Style {
        Style::default()
            .fg(self.active_tab)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn patch_style(&self) -> Style {
        Style::default().fg(self.patch)
    }

    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default().fg(self.checked).add_modifier(Modifier::BOLD)
    }

    /// Section headings inside overlays
    #[must_use]
    pub fn heading_style(&self) -> Style {
        self.cursor_style().add_modifier(Modifier::UNDERLINED)
    }
}
