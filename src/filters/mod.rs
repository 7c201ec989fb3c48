//! Filter predicates
//!
//! Four independent predicate families evaluated against each item of the
//! active collection:
//!
//! - **Source presence**: items without sources are hidden unless the
//!   show-no-source toggle is on
//! - **Search text**: case-insensitive substring of the name or description
//! - **Patch range**: the item's version lies in one of the active ranges
//! - **Category**: one of the item's sources carries one of the active tags
//!
//! # Examples
//!
//! ```
//! use collectr::filters::{FilterState, PatchRange};
//!
//! let mut state = FilterState::default();
//! state.toggle_patch(PatchRange::V2);
//! state.set_search_query("  Cho ");
//! assert_eq!(state.query(), "cho");
//! assert!(state.has_active_filters());
//!
//! state.clear_all();
//! assert!(!state.has_active_filters());
//! ```

pub mod error;
pub mod types;

pub use error::FilterError;
pub use types::{FilterState, PatchRange, passes};
