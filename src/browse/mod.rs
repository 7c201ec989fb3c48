//! Browse module - the filtering and paging pipeline
//!
//! UI-agnostic state and logic shared by the terminal UI and the one-shot
//! commands.
//!
//! - `session`: the controller owning all mutable browse state
//! - `pager`: incremental page rendering and the proximity trigger
//! - `debounce`: deadline-based search debounce
//! - `quick_jump`: cross-collection name search
//! - `detail`: resolved item detail

pub mod debounce;
pub mod detail;
pub mod pager;
pub mod quick_jump;
pub mod session;

pub use debounce::Debouncer;
pub use detail::{CostView, ItemDetail, SourceView};
pub use pager::{CollectingSink, PageOutcome, PageProgress, Pager, ProximityTrigger, RenderSink};
pub use quick_jump::{QuickJumpHit, quick_jump};
pub use session::{BrowseSession, SessionSettings};
