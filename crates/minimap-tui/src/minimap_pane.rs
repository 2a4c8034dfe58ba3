//! The minimap surface: a braille rendering of the document.
//!
//! One content line is one braille dot row and one text column is one dot
//! column, so a terminal cell covers four lines and two columns. All
//! minimap geometry is expressed in dot rows.

use std::ops::Range;
use std::sync::Arc;

use minimap_core::{Document, MinimapSurface, SliderState};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Braille dot rows per terminal cell
pub const DOTS_PER_CELL: u16 = 4;
/// Text columns per terminal cell
pub const COLUMNS_PER_CELL: usize = 2;

const TAB_STOP: usize = 4;
const BRAILLE_BASE: u32 = 0x2800;

/// Dot bits indexed by `[column][row]` within a cell
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

#[derive(Debug, Clone)]
pub struct MinimapPane {
    document: Arc<Document>,
    area: Rect,
}

impl MinimapPane {
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            document,
            area: Rect::default(),
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn set_document(&mut self, document: Arc<Document>) {
        self.document = document;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// A zero-sized area means the minimap is hidden
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    /// Pointer position of a terminal row: the middle of the cell, in dot rows
    pub fn pointer_y(row: u16) -> f64 {
        row as f64 * DOTS_PER_CELL as f64 + DOTS_PER_CELL as f64 / 2.0
    }
}

impl MinimapSurface for MinimapPane {
    fn top(&self) -> f64 {
        self.area.y as f64 * DOTS_PER_CELL as f64
    }

    fn map_height(&self) -> f64 {
        self.area.height as f64 * DOTS_PER_CELL as f64
    }

    fn mini_content_height(&self) -> f64 {
        self.document.line_count() as f64
    }
}

/// Which display columns of `line` carry ink, up to `max_columns`
fn ink_mask(line: &str, max_columns: usize) -> Vec<bool> {
    let mut mask = Vec::with_capacity(max_columns);
    for ch in line.chars() {
        if mask.len() >= max_columns {
            break;
        }
        if ch == '\t' {
            let next_stop = (mask.len() / TAB_STOP + 1) * TAB_STOP;
            mask.resize(next_stop.min(max_columns), false);
            continue;
        }
        let width = ch.width().unwrap_or(0);
        let ink = !ch.is_whitespace();
        for _ in 0..width {
            mask.push(ink);
        }
    }
    mask.truncate(max_columns);
    mask
}

/// Render `rows` cell rows of braille starting at dot row `first_line`,
/// each `columns` cells wide.
pub fn braille_rows(document: &Document, first_line: usize, rows: u16, columns: u16) -> Vec<String> {
    let columns = columns as usize;
    let text_columns = columns * COLUMNS_PER_CELL;

    (0..rows as usize)
        .map(|row| {
            let mut bits = vec![0u8; columns];
            let start = first_line + row * DOTS_PER_CELL as usize;
            for (dy, line) in document
                .window(start, DOTS_PER_CELL as usize)
                .iter()
                .enumerate()
            {
                for (x, ink) in ink_mask(line, text_columns).into_iter().enumerate() {
                    if ink {
                        bits[x / COLUMNS_PER_CELL] |= DOT_BITS[x % COLUMNS_PER_CELL][dy];
                    }
                }
            }
            bits.into_iter().map(braille_char).collect()
        })
        .collect()
}

fn braille_char(bits: u8) -> char {
    if bits == 0 {
        ' '
    } else {
        char::from_u32(BRAILLE_BASE + bits as u32).unwrap_or(' ')
    }
}

/// Cell rows of the minimap covered by the slider
pub fn slider_rows(slider: &SliderState, rows: u16) -> Range<u16> {
    if slider.height <= 0.0 {
        return 0..0;
    }
    let dots = DOTS_PER_CELL as f64;
    let start = (slider.top / dots).floor().max(0.0) as u16;
    let end = (slider.bottom() / dots).ceil().max(0.0) as u16;
    start.min(rows)..end.min(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Arc<Document> {
        Arc::new(Document::from_text(text))
    }

    #[test]
    fn test_surface_metrics() {
        let mut pane = MinimapPane::new(doc(&"x\n".repeat(300)));
        assert_eq!(pane.map_height(), 0.0);

        pane.set_area(Rect::new(70, 2, 10, 40));
        assert_eq!(pane.top(), 8.0);
        assert_eq!(pane.map_height(), 160.0);
        assert_eq!(pane.mini_content_height(), 300.0);
    }

    #[test]
    fn test_pointer_y_is_cell_centre() {
        assert_eq!(MinimapPane::pointer_y(0), 2.0);
        assert_eq!(MinimapPane::pointer_y(5), 22.0);
    }

    #[test]
    fn test_contains() {
        let mut pane = MinimapPane::new(doc("a"));
        pane.set_area(Rect::new(10, 0, 4, 5));
        assert!(pane.contains(10, 0));
        assert!(pane.contains(13, 4));
        assert!(!pane.contains(14, 0));
        assert!(!pane.contains(9, 0));
        assert!(!pane.contains(10, 5));
    }

    #[test]
    fn test_ink_mask() {
        assert_eq!(ink_mask("a b", 10), vec![true, false, true]);
        assert_eq!(ink_mask("\tx", 10), vec![false, false, false, false, true]);
        assert_eq!(ink_mask("abcdef", 4).len(), 4);
        // Wide characters take two columns
        assert_eq!(ink_mask("中", 10), vec![true, true]);
    }

    #[test]
    fn test_braille_full_cell() {
        let d = doc("xx\nxx\nxx\nxx\n");
        let rows = braille_rows(&d, 0, 1, 1);
        assert_eq!(rows, vec!["\u{28ff}".to_string()]);
    }

    #[test]
    fn test_braille_dot_positions() {
        // Only the left dot of the first row, only the right dot of the last row
        let d = doc("x\n\n\n x\n");
        let rows = braille_rows(&d, 0, 1, 1);
        let expected = char::from_u32(BRAILLE_BASE + 0x01 + 0x80).unwrap();
        assert_eq!(rows[0].chars().next(), Some(expected));
    }

    #[test]
    fn test_braille_blank_and_offset() {
        let d = doc("    \n\n\n\nab\n");
        let rows = braille_rows(&d, 0, 2, 2);
        assert_eq!(rows[0], "  ");
        assert_eq!(rows[1].chars().count(), 2);
        assert_ne!(rows[1].chars().next(), Some(' '));

        // Starting at the fifth line shifts it into the first row
        let shifted = braille_rows(&d, 4, 1, 2);
        assert_eq!(shifted[0], rows[1]);
    }

    #[test]
    fn test_braille_past_end_is_blank() {
        let d = doc("x\n");
        let rows = braille_rows(&d, 100, 2, 3);
        assert_eq!(rows, vec!["   ".to_string(), "   ".to_string()]);
    }

    #[test]
    fn test_slider_rows() {
        let slider = SliderState {
            top: 6.0,
            height: 20.0,
        };
        // Dots [6, 26) touch cells 1..7
        assert_eq!(slider_rows(&slider, 40), 1..7);
        assert_eq!(slider_rows(&slider, 3), 1..3);
        assert_eq!(slider_rows(&SliderState::default(), 40), 0..0);
    }
}
