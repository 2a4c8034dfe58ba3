use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::minimap_pane::{braille_rows, slider_rows};

pub struct MinimapWidget;

impl MinimapWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let minimap = &app.minimap;

        // Proxy scrolled by the last computed offset, slider drawn as a band
        let first_line = minimap.translate_y().round().max(0.0) as usize;
        let rows = braille_rows(app.document(), first_line, area.height, area.width);
        let band = slider_rows(&minimap.slider(), area.height);

        let slider_bg = if minimap.is_dragging() {
            theme.slider_active
        } else {
            theme.slider
        };

        let lines: Vec<Line> = rows
            .into_iter()
            .enumerate()
            .map(|(row, text)| {
                let bg = if band.contains(&(row as u16)) {
                    slider_bg
                } else {
                    theme.bg1
                };
                Line::from(Span::styled(
                    text,
                    Style::default().fg(theme.minimap_ink).bg(bg),
                ))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_slider_band_rendered() {
        let text: String = (0..100).map(|i| format!("let x{} = {};\n", i, i)).collect();
        let mut app = App::for_text(&text);
        let layout = app.layout(Rect::new(0, 0, 100, 41));
        app.apply_layout(&layout);
        let area = layout.minimap.unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 41)).unwrap();
        terminal
            .draw(|frame| MinimapWidget::render(frame, area, &app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        // Slider covers dot rows [0, 40) -> cell rows 0..10
        assert_eq!(buffer[(area.x, 0)].bg, app.theme.slider);
        assert_eq!(buffer[(area.x, 9)].bg, app.theme.slider);
        assert_eq!(buffer[(area.x, 10)].bg, app.theme.bg1);

        // First rows carry ink, rows past the 25th cell (100 lines) are blank
        assert_ne!(buffer[(area.x, 0)].symbol(), " ");
        assert_eq!(buffer[(area.x, 30)].symbol(), " ");
    }
}
