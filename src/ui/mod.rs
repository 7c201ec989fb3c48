//! User interface layer
//!
//! - **`output`**: status messages for one-shot commands
//! - **`ratatui_adapter`**: the interactive terminal browser
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      BrowseSession (browse module)      │
//! │  filters, sort, pager, debounce         │
//! └────────────────┬────────────────────────┘
//!                  │ RenderSink
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ CLI commands  │  │ BrowseApp         │
//! │ CollectingSink│  │ AppState (ratatui)│
//! └───────────────┘  └───────────────────┘
//! ```

mod error;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StdoutWriter};
pub use ratatui_adapter::BrowseApp;
