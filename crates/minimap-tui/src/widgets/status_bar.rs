use minimap_core::Regime;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, StatusMessage};

const HELP_HINT: &str = " q:quit j/k:scroll gg/G:jump m:minimap ";

pub struct StatusBarWidget;

impl StatusBarWidget {
    fn mode_label(app: &App) -> &'static str {
        if app.minimap.is_dragging() {
            " DRAG "
        } else {
            " NORMAL "
        }
    }

    fn details(app: &App) -> String {
        let (line, percent) = app
            .view()
            .map(|v| (v.scroll_top() + 1, v.percent()))
            .unwrap_or((1, 0));
        let total = app.document().line_count();

        let regime = match app.minimap.regime() {
            Some(Regime::Fit) => "fit",
            Some(Regime::Overflow) => "overflow",
            None => "-",
        };

        format!(
            "| {} | Ln {}/{} | {}% | map: {}",
            app.document().name(),
            line,
            total,
            percent,
            regime
        )
    }

    pub fn status_text(app: &App) -> String {
        if let Some(msg) = &app.status_message {
            return msg.text().to_string();
        }
        format!("{}{}", Self::mode_label(app), Self::details(app))
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().bg(theme.bg2);

        let mut spans = match &app.status_message {
            Some(msg) => {
                let fg = match msg {
                    StatusMessage::Info(_) => theme.accent,
                    StatusMessage::Warning(_) => theme.warning,
                };
                vec![Span::styled(msg.text().to_string(), bar.fg(fg))]
            }
            None => {
                let mode = if app.minimap.is_dragging() {
                    Style::default()
                        .fg(theme.bg0)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    bar.fg(theme.fg1).add_modifier(Modifier::BOLD)
                };
                vec![
                    Span::styled(Self::mode_label(app), mode),
                    Span::styled(Self::details(app), bar.fg(theme.fg0)),
                ]
            }
        };

        // Display width, not bytes: file names may be wide or multi-byte
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let padding_len = (area.width as usize).saturating_sub(used + HELP_HINT.width());
        spans.push(Span::styled(" ".repeat(padding_len), bar));
        spans.push(Span::styled(HELP_HINT, bar.fg(theme.grey2)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
