//! Ratatui-based catalog browser
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              BrowseApp                      │
//! │  (draw, poll input, dispatch commands)      │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │  Session   │ │  Ratatui  │ │ Crossterm │
//! │ (browse)   │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! # Features
//!
//! - **Collection tabs** with per-collection item counts
//! - **Debounced search** with cross-collection quick-jump suggestions
//! - **Filter panel** for source categories, patch ranges and sort order
//! - **Incremental paging** on scroll or with an explicit "load more"
//! - **Detail overlay** (Enter) and **help overlay** (F1 / ?)

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::BrowseApp;
pub use events::{Command, EventResult};
pub use state::{AppState, FilterEntry, Mode};
pub use theme::Theme;
