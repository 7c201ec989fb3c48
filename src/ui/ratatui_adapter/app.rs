//! Terminal browser application
//!
//! Owns the [`BrowseSession`] and the screen [`AppState`]. The loop draws,
//! polls input every 50ms, forwards [`Command`]s to the session and then
//! lets the session apply a due search and load pages near the end of the
//! list.

use super::events::{Command, EventResult, poll_and_handle};
use super::state::{AppState, FilterEntry, Mode};
use super::theme::Theme;
use super::widgets::{
    CollectionTabs, DetailsModal, FilterPanel, HelpBar, HelpOverlay, ItemList, QuickJumpPopup,
    SearchBar, StatusBar,
};
use crate::browse::{BrowseSession, PageOutcome};
use crate::ui::error::{Result, UiError};
use crate::ui::output::MessageLevel;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, IsTerminal, Stdout};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const FILTER_PANEL_WIDTH: u16 = 28;

/// Interactive browser over one session
pub struct BrowseApp<'a> {
    session: BrowseSession<'a>,
    state: AppState,
    theme: Theme,
}

impl<'a> BrowseApp<'a> {
    #[must_use]
    pub fn new(session: BrowseSession<'a>) -> Self {
        let mut state = AppState::new();
        // search box mirrors a query given on the command line
        state.query = session.filter().query().to_string();
        state.query_cursor = state.query.len();
        Self {
            session,
            state,
            theme: Theme::default(),
        }
    }

    /// Show a load failure instead of the item list
    #[must_use]
    pub fn with_load_error(mut self, message: impl Into<String>) -> Self {
        self.state.load_error = Some(message.into());
        self
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn session(&self) -> &BrowseSession<'a> {
        &self.session
    }

    /// Run the browser until the user quits
    ///
    /// # Errors
    ///
    /// Returns `UiError::NotATerminal` when stdout is not a terminal and
    /// `UiError::IoError` when drawing or reading events fails.
    pub fn run(mut self) -> Result<()> {
        if !io::stdout().is_terminal() {
            return Err(UiError::NotATerminal);
        }

        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!(error = %e, "terminal cleanup failed");
            eprintln!("Warning: terminal cleanup failed: {e}");
        }

        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        if self.state.load_error.is_none() {
            self.session.start(&mut self.state);
        }

        loop {
            self.state.cleanup_messages();

            terminal.draw(|frame| self.render(frame))?;

            match poll_and_handle(&mut self.state, POLL_INTERVAL)? {
                EventResult::Quit => break,
                EventResult::Command(command) => self.apply(command),
                EventResult::Continue | EventResult::Ignored => {}
            }

            if self.state.should_exit {
                break;
            }
            self.tick(Instant::now());
        }

        Ok(())
    }

    /// Time-driven work: a due search and proximity paging
    pub fn tick(&mut self, now: Instant) {
        if self.state.load_error.is_some() {
            return;
        }
        if self.session.poll(now, &mut self.state) {
            self.state.set_quick_jump(self.session.quick_jump_hits());
        }
        if let Some(PageOutcome::Rendered(range)) =
            self.session.on_viewport(self.state.viewport_end(), &mut self.state)
        {
            tracing::trace!(start = range.start, end = range.end, "proximity page loaded");
        }
    }

    /// Forward a command to the session
    pub fn apply(&mut self, command: Command) {
        if self.state.load_error.is_some() {
            return;
        }

        let session = &mut self.session;
        let state = &mut self.state;
        match command {
            Command::NextCollection => {
                session.next_collection(state);
            }
            Command::PrevCollection => {
                session.prev_collection(state);
            }
            Command::SearchChanged => session.input_search(&state.query, Instant::now()),
            Command::ToggleFilter(entry) => match entry {
                FilterEntry::Category(category) => session.toggle_category(category, state),
                FilterEntry::Patch(range) => session.toggle_patch(range, state),
                FilterEntry::ShowNoSource => session.toggle_show_no_source(state),
                FilterEntry::Sort => {
                    let sort = session.cycle_sort(state);
                    state.add_message(MessageLevel::Info, format!("Sort: {}", sort.label()));
                }
            },
            Command::CycleSort => {
                let sort = session.cycle_sort(state);
                state.add_message(MessageLevel::Info, format!("Sort: {}", sort.label()));
            }
            Command::ClearFilters => {
                session.clear_filters(state);
                state.query_clear();
                state.set_quick_jump(&[]);
                state.add_message(MessageLevel::Success, "Filters cleared");
            }
            Command::ToggleNoSource => {
                session.toggle_show_no_source(state);
                let label = if session.filter().show_no_source {
                    "Showing items without source"
                } else {
                    "Hiding items without source"
                };
                state.add_message(MessageLevel::Info, label);
            }
            Command::LoadMore => match session.load_more(state) {
                PageOutcome::Rendered(_) => {}
                PageOutcome::Busy => tracing::debug!("load more ignored while a page is loading"),
                PageOutcome::Exhausted => state.add_message(MessageLevel::Info, "All items loaded"),
            },
            Command::OpenDetail(id) => match session.detail(id) {
                Some(detail) => state.open_detail(detail),
                None => state.add_message(MessageLevel::Warning, format!("Item #{id} not found")),
            },
            Command::SelectQuickJump(index) => {
                if let Some(detail) = session.select_quick_jump(index, state) {
                    state.set_quick_jump(&[]);
                    state.open_detail(detail);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let main_layout = Layout::vertical([
            Constraint::Length(1), // Collection tabs
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Content (items + filters)
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let tabs: Vec<(&str, usize)> = self
            .session
            .tabs()
            .iter()
            .map(|c| (c.name.as_str(), c.items.len()))
            .collect();
        frame.render_widget(
            CollectionTabs::new(tabs, self.session.active_index(), &self.theme),
            main_layout[0],
        );

        let search_bar = SearchBar::new(&self.state.query, self.state.query_cursor, &self.theme)
            .focused(self.state.mode == Mode::Search)
            .pending(self.session.search_pending());
        frame.render_widget(search_bar, main_layout[1]);

        self.render_content(frame, main_layout[2]);

        let messages = self.state.active_messages();
        frame.render_widget(
            StatusBar::new(&messages, self.state.progress, &self.theme),
            main_layout[3],
        );

        frame.render_widget(HelpBar::new(self.state.mode, &self.theme), main_layout[4]);

        self.render_overlays(frame, main_layout[1], area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(error) = &self.state.load_error {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.error_style())
                .title(" Failed to load data ");
            let text = vec![
                Line::styled("Failed to load data", self.theme.error_style()),
                Line::default(),
                Line::raw(error.as_str()),
            ];
            frame.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
                area,
            );
            return;
        }

        let [list_area, filter_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(FILTER_PANEL_WIDTH)]).areas(area);

        // Borders take two rows
        self.state.visible_height = list_area.height.saturating_sub(2) as usize;

        let title = self.session.active_collection().map_or_else(
            || " Items ".to_string(),
            |c| format!(" {} ({}/{}) ", c.name, self.state.progress.filtered, self.state.progress.total),
        );
        frame.render_widget(
            ItemList::new(&self.state, &self.theme)
                .title(title)
                .focused(self.state.mode == Mode::Normal),
            list_area,
        );

        let filter_panel = FilterPanel::new(
            &self.state.filter_entries,
            self.session.filter(),
            self.session.sort(),
            &self.theme,
        )
        .focused(self.state.mode == Mode::Filters, self.state.filter_cursor);
        frame.render_widget(filter_panel, filter_area);
    }

    fn render_overlays(&self, frame: &mut Frame, search_area: Rect, area: Rect) {
        let show_suggestions = matches!(self.state.mode, Mode::Search | Mode::QuickJump)
            && !self.state.quick_jump.is_empty();
        if show_suggestions {
            let popup = QuickJumpPopup::new(&self.state.quick_jump, self.state.quick_jump_cursor, &self.theme)
                .focused(self.state.mode == Mode::QuickJump);
            let popup_area = popup.area(search_area, area);
            frame.render_widget(popup, popup_area);
        }

        match self.state.mode {
            Mode::Help => frame.render_widget(HelpOverlay::new(&self.theme), area),
            Mode::Detail => {
                if let Some(detail) = &self.state.detail {
                    frame.render_widget(DetailsModal::new(detail, self.state.detail_scroll, &self.theme), area);
                }
            }
            _ => {}
        }
    }
}
