//! Bulk selection state for paginated tables.
//!
//! A [`SelectionSet`] is owned by the page-level container. The
//! [`BulkSelector`] mutates it in response to bulk-menu actions and derives the
//! tri-state checkbox and the "Select page" estimate from whatever
//! [`PageSnapshot`] the caller hands it on each evaluation.

pub mod keyed;
pub mod menu;
pub mod set;
pub mod tracker;

pub use keyed::{has_nonempty_key, Keyed};
pub use menu::{BulkMenu, CaptureGuard, InputCapture, MenuInput, MenuOutcome};
pub use set::SelectionSet;
pub use tracker::{
    page_fully_selected, select_page_estimate, selected_on_page, tri_state, BulkSelector,
    MenuEntry, MenuItem, PageSnapshot, SelectionConsumer, TriState,
};
