//! View rendering dispatch.

pub mod host_groups;
pub mod id_views;
pub mod modal;

use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::HostGroups => host_groups::render(f, app, layout[1]),
        View::IdViewSettings => id_views::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if let Some(modal) = &app.modal {
        modal::render(f, app, modal);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let tabs: Vec<Span> = View::all()
        .iter()
        .flat_map(|view| {
            let style = if *view == app.active_view {
                Style::default().fg(app.theme.primary)
            } else {
                Style::default().fg(app.theme.text_dim)
            };
            [Span::styled(format!(" {} ", view.title()), style), Span::raw("|")]
        })
        .collect();
    let header = Paragraph::new(Line::from(tabs)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!("IDM Console | {}", app.config.rpc_url),
                Style::default().fg(app.theme.secondary),
            )),
    );
    f.render_widget(header, area);
}

fn footer_help(app: &App) -> &'static str {
    if app.search_input.is_some() {
        return "type to search • Enter submit • Esc cancel";
    }
    if app.host_groups.bulk.is_menu_open() {
        return "j/k move • Enter choose • Esc/Tab close";
    }
    match app.active_view {
        View::HostGroups => {
            "Space select • b bulk menu • x bulk checkbox • a select all • [/] page • p per page • / search • n add • d delete • r refresh • ? help • q quit"
        }
        View::IdViewSettings => {
            "j/k field • e edit • u revert • s save • r refresh • Tab switch view • ? help • q quit"
        }
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = if let Some(search) = &app.search_input {
        (format!("Search: {}_", search), Style::default().fg(app.theme.primary))
    } else if let Some(note) = app.alerts.latest() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        (
            format!("{}: {}", label, note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (footer_help(app).to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

/// Centered rectangle `percent_x` wide and `height` rows tall.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
