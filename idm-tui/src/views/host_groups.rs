//! Host group table with cross-page bulk selection.

use crate::model::is_host_group_selectable;
use crate::state::App;
use crate::theme::tri_state_color;
use crate::widgets::{BulkSelectorWidget, PaginationBar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_table(f, app, chunks[1]);
    render_pagination(f, app, chunks[2]);
    // last so the open menu overlaps the table
    render_toolbar(f, app, chunks[0]);
}

fn render_toolbar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.host_groups;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(area);

    let entries = view.menu_entries();
    let state = view.tri_state();
    let selector = BulkSelectorWidget {
        state,
        selected_count: view.selection.len(),
        entries: &entries,
        menu_open: view.bulk.is_menu_open(),
        highlighted: view.bulk.menu().highlighted(),
        style: Style::default().fg(tri_state_color(state, &app.theme)),
        highlight_style: Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight),
    };

    let search = if view.search_value.is_empty() {
        "Search: (none)".to_string()
    } else {
        format!("Search: {}", view.search_value)
    };
    let delete_style = if view.delete_enabled {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().fg(app.theme.text_muted)
    };
    let toolbar = Paragraph::new(ratatui::text::Line::from(vec![
        Span::styled(search, Style::default().fg(app.theme.text_dim)),
        Span::raw("   "),
        Span::styled("[d] Delete", delete_style),
        Span::raw("  "),
        Span::styled("[n] Add", Style::default().fg(app.theme.primary)),
    ]));
    f.render_widget(toolbar, columns[1]);
    selector.render(f, columns[0]);
}

fn render_table(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.host_groups;
    let block = Block::default()
        .title(format!("Host groups ({})", view.total_count))
        .borders(Borders::ALL);

    if !view.show_rows {
        f.render_widget(Paragraph::new("Loading...").block(block), area);
        return;
    }
    if view.rows.is_empty() {
        f.render_widget(Paragraph::new("No host groups found").block(block), area);
        return;
    }

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|group| {
            let checkbox = if !is_host_group_selectable(group) {
                "   "
            } else if view.is_row_selected(group) {
                "[x]"
            } else {
                "[ ]"
            };
            Row::new(vec![
                Cell::from(checkbox),
                Cell::from(group.cn.clone()),
                Cell::from(group.description.clone().unwrap_or_default()),
                Cell::from(group.member_hosts.len().to_string()),
            ])
        })
        .collect();

    let header = Row::new(vec!["", "Name", "Description", "Hosts"])
        .style(Style::default().fg(app.theme.secondary).add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(30),
        Constraint::Percentage(55),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight));

    let mut state = TableState::default();
    state.select(Some(view.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_pagination(f: &mut Frame<'_>, app: &App, area: Rect) {
    let bar = PaginationBar {
        pagination: &app.host_groups.pagination,
        total: app.host_groups.total_count,
        style: Style::default().fg(app.theme.text_dim),
    };
    bar.render(f, area);
}
