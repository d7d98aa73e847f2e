//! Bulk selector toggle and its dropdown menu.

use idm_select::{MenuEntry, TriState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn checkbox_glyph(state: TriState) -> &'static str {
    match state {
        TriState::Checked => "[x]",
        TriState::Indeterminate => "[-]",
        TriState::Unchecked => "[ ]",
    }
}

pub struct BulkSelectorWidget<'a> {
    pub state: TriState,
    pub selected_count: usize,
    pub entries: &'a [MenuEntry],
    pub menu_open: bool,
    pub highlighted: usize,
    pub style: Style,
    pub highlight_style: Style,
}

impl<'a> BulkSelectorWidget<'a> {
    pub fn toggle_label(&self) -> String {
        let arrow = if self.menu_open { "▴" } else { "▾" };
        if self.selected_count > 0 {
            format!("{} {} selected {}", checkbox_glyph(self.state), self.selected_count, arrow)
        } else {
            format!("{} {}", checkbox_glyph(self.state), arrow)
        }
    }

    /// Draws the toggle in `area`; the open menu drops down below it.
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let toggle = Paragraph::new(Line::from(Span::styled(self.toggle_label(), self.style)));
        f.render_widget(toggle, area);

        if !self.menu_open {
            return;
        }
        let width = self
            .entries
            .iter()
            .map(|entry| entry.label.chars().count() as u16 + 4)
            .max()
            .unwrap_or(20);
        let frame = f.size();
        let popup = Rect {
            x: area.x,
            y: area.y.saturating_add(1),
            width: width.min(frame.width.saturating_sub(area.x)),
            height: (self.entries.len() as u16 + 2).min(frame.height.saturating_sub(area.y + 1)),
        };
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(entry.label.clone()))
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.highlighted));
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).border_style(self.style))
            .highlight_style(self.highlight_style.add_modifier(Modifier::BOLD));
        f.render_widget(Clear, popup);
        f.render_stateful_widget(menu, popup, &mut state);
    }
}
