//! Modal dialogs drawn over the active view.

use super::centered_rect;
use crate::forms::AddField;
use crate::state::{App, Modal};
use crate::widgets::FormField;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const HELP_LINES: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "switch view"),
    ("j / k", "move cursor"),
    ("Space", "select row"),
    ("b", "bulk selection menu"),
    ("x", "bulk checkbox"),
    ("a", "select all across pages"),
    ("] / [", "next / previous page"),
    ("p", "cycle rows per page"),
    ("/", "search"),
    ("r", "refresh"),
    ("n", "add host group"),
    ("d", "delete selected host groups"),
    ("e", "edit field (ID view)"),
    ("u", "revert changes (ID view)"),
    ("s", "save changes (ID view)"),
    ("q", "quit"),
];

pub fn render(f: &mut Frame<'_>, app: &App, modal: &Modal) {
    let area = f.size();
    match modal {
        Modal::Help => render_help(f, app, modal, area),
        Modal::AddHostGroup(form) => {
            let name = FormField {
                field: &form.name,
                focused: form.focused == AddField::Name,
                theme: &app.theme,
            };
            let description = FormField {
                field: &form.description,
                focused: form.focused == AddField::Description,
                theme: &app.theme,
            };
            let height = name.height() + description.height() + 4;
            let popup = centered_rect(60, height, area);
            let inner = frame_popup(f, app, modal.title(), popup);

            let name_area = Rect { height: name.height().min(inner.height), ..inner };
            name.render(f, name_area);
            let description_area = Rect {
                y: name_area.y + name_area.height,
                height: description.height().min(inner.height.saturating_sub(name_area.height)),
                ..inner
            };
            description.render(f, description_area);

            let submit_style = if form.can_submit() {
                Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text_muted)
            };
            let buttons = Line::from(vec![
                Span::styled("[Enter] Add", submit_style),
                Span::raw("   "),
                Span::styled("[Esc] Cancel", Style::default().fg(app.theme.text_dim)),
            ]);
            let buttons_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            f.render_widget(Paragraph::new(buttons), buttons_area);
        }
        Modal::DeleteHostGroups { keys } => {
            let mut lines = vec![
                Line::from("The following host groups will be removed:"),
                Line::from(""),
            ];
            lines.extend(keys.iter().map(|key| Line::from(format!("  • {}", key))));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("[Enter] Delete", Style::default().fg(app.theme.error)),
                Span::raw("   "),
                Span::styled("[Esc] Cancel", Style::default().fg(app.theme.text_dim)),
            ]));
            let popup = centered_rect(60, lines.len() as u16 + 2, area);
            let inner = frame_popup(f, app, modal.title(), popup);
            f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), inner);
        }
    }
}

fn render_help(f: &mut Frame<'_>, app: &App, modal: &Modal, area: Rect) {
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", keys), Style::default().fg(app.theme.primary)),
                Span::raw(*description),
            ])
        })
        .collect();
    let popup = centered_rect(50, HELP_LINES.len() as u16 + 2, area);
    let inner = frame_popup(f, app, modal.title(), popup);
    f.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Clears `popup`, draws its border and returns the inner area.
fn frame_popup(f: &mut Frame<'_>, app: &App, title: &str, popup: Rect) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focus));
    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);
    inner
}
