//! Event handling for the ratatui TUI
//!
//! Maps key and mouse events to state changes and to [`Command`]s the app
//! forwards to the browse session.

use super::state::{AppState, FilterEntry, Mode};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Session operation requested by a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextCollection,
    PrevCollection,
    /// The search box text changed
    SearchChanged,
    ToggleFilter(FilterEntry),
    CycleSort,
    ClearFilters,
    ToggleNoSource,
    LoadMore,
    OpenDetail(u32),
    SelectQuickJump(usize),
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Forward a command to the session
    Command(Command),
    /// Leave the browser
    Quit,
    /// No action taken
    Ignored,
}

/// Handle a key press in the current mode
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return EventResult::Quit;
    }

    match state.mode {
        Mode::Normal => handle_normal_mode(state, key),
        Mode::Search => handle_search_mode(state, key),
        Mode::QuickJump => handle_quick_jump_mode(state, key),
        Mode::Filters => handle_filters_mode(state, key),
        Mode::Detail => handle_detail_mode(state, key),
        Mode::Help => {
            // Any key closes help
            state.mode = Mode::Normal;
            EventResult::Continue
        }
    }
}

fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor_up();
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.cursor_down();
            EventResult::Continue
        }
        KeyCode::PageUp => {
            state.page_up();
            EventResult::Continue
        }
        KeyCode::PageDown => {
            state.page_down();
            EventResult::Continue
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.jump_to_start();
            EventResult::Continue
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.jump_to_end();
            EventResult::Continue
        }

        KeyCode::Tab => EventResult::Command(Command::NextCollection),
        KeyCode::BackTab => EventResult::Command(Command::PrevCollection),

        KeyCode::Char('/') => {
            state.mode = Mode::Search;
            EventResult::Continue
        }
        KeyCode::Char('f') => {
            state.mode = Mode::Filters;
            EventResult::Continue
        }
        KeyCode::Char('s') => EventResult::Command(Command::CycleSort),
        KeyCode::Char('c') => EventResult::Command(Command::ClearFilters),
        KeyCode::Char('n') => EventResult::Command(Command::ToggleNoSource),
        KeyCode::Char('m') => EventResult::Command(Command::LoadMore),
        KeyCode::Enter => state
            .current_row()
            .map_or(EventResult::Ignored, |row| EventResult::Command(Command::OpenDetail(row.id))),

        KeyCode::F(1) | KeyCode::Char('?') => {
            state.mode = Mode::Help;
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            state.mode = Mode::Normal;
            EventResult::Continue
        }
        (KeyCode::Enter | KeyCode::Down, _) => {
            state.mode = if state.quick_jump.is_empty() {
                Mode::Normal
            } else {
                Mode::QuickJump
            };
            EventResult::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.query_clear();
            EventResult::Command(Command::SearchChanged)
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::Command(Command::SearchChanged)
        }
        (KeyCode::Backspace, _) => {
            if state.query_backspace() {
                EventResult::Command(Command::SearchChanged)
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Delete, _) => {
            if state.query_delete() {
                EventResult::Command(Command::SearchChanged)
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

fn handle_quick_jump_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Search;
            EventResult::Continue
        }
        KeyCode::Up => {
            if state.quick_jump_cursor == 0 {
                state.mode = Mode::Search;
            } else {
                state.quick_jump_up();
            }
            EventResult::Continue
        }
        KeyCode::Down => {
            state.quick_jump_down();
            EventResult::Continue
        }
        KeyCode::Enter if !state.quick_jump.is_empty() => {
            EventResult::Command(Command::SelectQuickJump(state.quick_jump_cursor))
        }
        _ => EventResult::Ignored,
    }
}

fn handle_filters_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('f' | 'q') => {
            state.mode = Mode::Normal;
            EventResult::Continue
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.filter_cursor_up();
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.filter_cursor_down();
            EventResult::Continue
        }
        KeyCode::Char(' ') | KeyCode::Enter => state
            .current_filter_entry()
            .map_or(EventResult::Ignored, |entry| EventResult::Command(Command::ToggleFilter(entry))),
        KeyCode::Char('c') => EventResult::Command(Command::ClearFilters),
        _ => EventResult::Ignored,
    }
}

fn handle_detail_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            state.close_detail();
            EventResult::Continue
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.detail_scroll = state.detail_scroll.saturating_sub(1);
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.detail_scroll = state.detail_scroll.saturating_add(1);
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle mouse events
fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> EventResult {
    if state.mode != Mode::Normal {
        return EventResult::Ignored;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
