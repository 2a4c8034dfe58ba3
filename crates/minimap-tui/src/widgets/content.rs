use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;

pub struct ContentWidget;

impl ContentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let Some(view) = app.view() else {
            return;
        };

        let show_numbers = app.config.ui.show_line_numbers;
        let gutter_width = view.document().line_count().max(1).to_string().len();
        let first = view.scroll_top();

        let lines: Vec<Line> = view
            .visible_lines()
            .iter()
            .enumerate()
            .map(|(offset, text)| {
                let mut spans = Vec::with_capacity(2);
                if show_numbers {
                    spans.push(Span::styled(
                        format!("{:>width$} ", first + offset + 1, width = gutter_width),
                        Style::default().fg(theme.grey0),
                    ));
                }
                spans.push(Span::styled(text.as_str(), Style::default().fg(theme.fg0)));
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().style(Style::default().bg(theme.bg0)));
        frame.render_widget(paragraph, area);
    }
}
