//! Reusable widget components.

pub mod bulk_selector;
pub mod detail;
pub mod form_field;
pub mod pagination;

pub use bulk_selector::{checkbox_glyph, BulkSelectorWidget};
pub use detail::DetailPanel;
pub use form_field::FormField;
pub use pagination::{range_label, PaginationBar};
