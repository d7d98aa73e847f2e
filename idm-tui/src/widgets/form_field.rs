//! Text field with its helper lines.

use crate::forms::TextField;
use crate::theme::{rule_state_color, ConsoleTheme};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct FormField<'a> {
    pub field: &'a TextField,
    pub focused: bool,
    pub theme: &'a ConsoleTheme,
}

impl<'a> FormField<'a> {
    /// Rows needed: the bordered input plus one line per helper.
    pub fn height(&self) -> u16 {
        let helpers = if self.field.value.is_empty() {
            usize::from(self.field.required_helper().is_some())
        } else {
            self.field.rules.len()
        };
        3 + helpers as u16
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let border = if self.focused {
            self.theme.border_focus
        } else if self.field.is_invalid() {
            self.theme.error
        } else {
            self.theme.border
        };
        let title = if self.field.required {
            format!("{} *", self.field.label)
        } else {
            self.field.label.to_string()
        };
        let cursor = if self.focused { "_" } else { "" };

        let mut lines = vec![Line::from(format!("{}{}", self.field.value, cursor))];
        if let Some(helper) = self.field.required_helper() {
            lines.push(Line::from(Span::styled(helper, Style::default().fg(self.theme.text_dim))));
        }
        if !self.field.value.is_empty() {
            for ((_, state), rule) in self.field.rule_states().into_iter().zip(self.field.rules) {
                lines.push(Line::from(Span::styled(
                    rule.message,
                    Style::default().fg(rule_state_color(state, self.theme)),
                )));
            }
        }

        let input_area = Rect { height: area.height.min(3), ..area };
        let helper_area = Rect {
            y: area.y + input_area.height,
            height: area.height.saturating_sub(input_area.height),
            ..area
        };
        let input = Paragraph::new(lines.remove(0)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(input, input_area);
        f.render_widget(Paragraph::new(Text::from(lines)), helper_area);
    }
}
