//! ID view settings screen.

use crate::state::{App, IdViewField};
use crate::widgets::DetailPanel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let state = &app.id_view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let title = format!("ID view: {}", app.config.id_view);
    if state.current.is_none() {
        let message = if state.is_loading { "Loading..." } else { "Not loaded (r to refresh)" };
        let block = Block::default().title(title.as_str()).borders(Borders::ALL);
        f.render_widget(Paragraph::new(message).block(block), chunks[0]);
        return;
    }

    let fields: Vec<(&str, String)> = IdViewField::all()
        .iter()
        .map(|field| {
            let value = match (&state.editing, *field == state.focused) {
                (Some(buffer), true) => format!("{}_", buffer),
                _ => state.field_value(*field).to_string(),
            };
            (field.label(), value)
        })
        .collect();
    let focused = IdViewField::all().iter().position(|field| *field == state.focused);
    let detail = DetailPanel {
        title: title.as_str(),
        fields,
        style: Style::default().fg(app.theme.secondary),
        focused,
    };
    detail.render(f, chunks[0]);

    let status = if state.is_saving {
        ("Saving...", app.theme.info)
    } else if state.is_modified() {
        ("Modified: s save • u revert", app.theme.warning)
    } else {
        ("No changes", app.theme.text_dim)
    };
    let domains = state
        .current
        .as_ref()
        .map(|view| view.resolution_domains().len())
        .unwrap_or(0);
    let line = format!("{} | {} domain(s) in resolution order", status.0, domains);
    f.render_widget(
        Paragraph::new(line)
            .style(Style::default().fg(status.1))
            .block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );
}
