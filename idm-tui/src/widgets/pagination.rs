//! Pagination summary line.

use crate::state::Pagination;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// "11 - 20 of 42", or "0 - 0 of 0" for an empty collection.
pub fn range_label(pagination: &Pagination, total: usize) -> String {
    if total == 0 {
        return "0 - 0 of 0".to_string();
    }
    let (start, stop) = pagination.page_bounds();
    format!("{} - {} of {}", (start + 1).min(total), stop.min(total), total)
}

pub struct PaginationBar<'a> {
    pub pagination: &'a Pagination,
    pub total: usize,
    pub style: Style,
}

impl<'a> PaginationBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let text = format!(
            "{}  |  page {}/{}  |  {} per page",
            range_label(self.pagination, self.total),
            self.pagination.page,
            self.pagination.page_count(self.total),
            self.pagination.per_page
        );
        f.render_widget(Paragraph::new(text).style(self.style), area);
    }
}
