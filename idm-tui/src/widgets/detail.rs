//! Detail panel widget for showing field/value pairs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    pub style: Style,
    /// Index of the field drawn highlighted, if any.
    pub focused: Option<usize>,
}

impl<'a> DetailPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, (label, value))| {
                let marker = if self.focused == Some(index) { "> " } else { "  " };
                let label_style = if self.focused == Some(index) {
                    self.style.add_modifier(Modifier::BOLD)
                } else {
                    self.style
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("{}: ", label), label_style),
                    Span::raw(value.clone()),
                ])
            })
            .collect();

        let text = Text::from(lines);
        let widget = Paragraph::new(text)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });

        f.render_widget(widget, area);
    }
}
