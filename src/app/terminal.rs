//! A [`Surface`] over a ratatui buffer, one cell per pixel.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::ui::style::{Color, Font};
use crate::ui::surface::{Rect, Surface};

/// Draws into an offscreen ratatui [`Buffer`] that the event loop blits to
/// the terminal.
///
/// Coordinates are cells: the editor runs with one-cell glyph metrics, so
/// every column and row lands on a whole cell.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    buffer: Buffer,
    client: (u16, u16),
    frames: u64,
}

impl TerminalSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(CellRect::new(0, 0, width, height)),
            client: (width, height),
            frames: 0,
        }
    }

    /// Record a new terminal size; applied on the next resize event.
    pub const fn set_client_size(&mut self, width: u16, height: u16) {
        self.client = (width, height);
    }

    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Number of frames composited so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Snap a pixel span to whole cells, clipped to `0..limit`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cells(start: f32, len: f32, limit: u16) -> std::ops::Range<u16> {
        let from = start.round().clamp(0.0, f32::from(limit)) as u16;
        let to = (start + len).round().clamp(0.0, f32::from(limit)) as u16;
        from..to.max(from)
    }
}

const fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

impl Surface for TerminalSurface {
    fn client_size(&self) -> (f32, f32) {
        (f32::from(self.client.0), f32::from(self.client.1))
    }

    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(height).unwrap_or(u16::MAX);
        self.buffer = Buffer::empty(CellRect::new(0, 0, width, height));
    }

    fn backing_size(&self) -> (u32, u32) {
        (u32::from(self.buffer.area.width), u32::from(self.buffer.area.height))
    }

    fn set_scale(&mut self, _scale: f32) {}

    fn begin_frame(&mut self) {
        self.frames += 1;
        self.buffer.reset();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let area = self.buffer.area;
        for y in Self::cells(rect.y, rect.height, area.height) {
            for x in Self::cells(rect.x, rect.width, area.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_bg(term_color(color));
                }
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &Font, color: Color) {
        let area = self.buffer.area;
        let (x, y) = (x.round(), y.round());
        if y < 0.0 || y >= f32::from(area.height) || x >= f32::from(area.width) {
            return;
        }

        // Drop whatever falls left of the surface.
        let mut text = text;
        let mut col = x;
        while col < 0.0 {
            let Some(ch) = text.chars().next() else {
                return;
            };
            col += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0).max(1) as f32;
            text = &text[ch.len_utf8()..];
        }

        let mut style = Style::default().fg(term_color(color));
        if font.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if font.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        let (col, row) = (col as u16, y as u16);
        let max_width = usize::from(area.width.saturating_sub(col));
        self.buffer.set_stringn(col, row, text, max_width, style);
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str, _font: &Font) -> f32 {
        text.width() as f32
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: CellRect, buf: &mut Buffer) {
        let source = self.buffer.area;
        for y in 0..area.height.min(source.height) {
            for x in 0..area.width.min(source.width) {
                let (Some(src), Some(dst)) = (
                    self.buffer.cell((x, y)),
                    buf.cell_mut((area.x + x, area.y + y)),
                ) else {
                    continue;
                };
                *dst = src.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn symbols(surface: &TerminalSurface, row: u16) -> String {
        (0..surface.buffer().area.width)
            .filter_map(|x| surface.buffer().cell((x, row)))
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_fill_text_writes_cells() {
        let mut surface = TerminalSurface::new(10, 2);
        surface.fill_text("abc", 2.0, 1.0, &Font::default(), RED);
        assert_eq!(symbols(&surface, 1), "  abc     ");
        let cell = surface.buffer().cell((2, 1)).unwrap();
        assert_eq!(cell.fg, TermColor::Rgb(255, 0, 0));
    }

    #[test]
    fn test_fill_text_clips_left_and_right() {
        let mut surface = TerminalSurface::new(4, 1);
        surface.fill_text("abcdef", -2.0, 0.0, &Font::default(), RED);
        assert_eq!(symbols(&surface, 0), "cdef");
    }

    #[test]
    fn test_fill_text_outside_rows_is_ignored() {
        let mut surface = TerminalSurface::new(4, 1);
        surface.fill_text("ab", 0.0, -1.0, &Font::default(), RED);
        surface.fill_text("ab", 0.0, 1.0, &Font::default(), RED);
        assert_eq!(symbols(&surface, 0), "    ");
    }

    #[test]
    fn test_bold_font_sets_modifier() {
        let mut surface = TerminalSurface::new(4, 1);
        surface.fill_text("a", 0.0, 0.0, &Font::default().styled(true, false), RED);
        let cell = surface.buffer().cell((0, 0)).unwrap();
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_fill_rect_snaps_to_cells() {
        let mut surface = TerminalSurface::new(6, 2);
        surface.fill_rect(Rect::new(1.5, 0.0, 1.0, 1.0), RED);
        let painted: Vec<u16> = (0..6)
            .filter(|x| surface.buffer().cell((*x, 0)).unwrap().bg == TermColor::Rgb(255, 0, 0))
            .collect();
        assert_eq!(painted, vec![2]);
    }

    #[test]
    fn test_measure_uses_display_width() {
        let surface = TerminalSurface::new(4, 1);
        assert!((surface.measure_text("日本", &Font::default()) - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_begin_frame_clears_buffer() {
        let mut surface = TerminalSurface::new(4, 1);
        surface.fill_text("ab", 0.0, 0.0, &Font::default(), RED);
        surface.begin_frame();
        assert_eq!(symbols(&surface, 0), "    ");
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_widget_copies_cells() {
        let mut surface = TerminalSurface::new(3, 1);
        surface.fill_text("xyz", 0.0, 0.0, &Font::default(), RED);
        let mut target = Buffer::empty(CellRect::new(0, 0, 5, 1));
        (&surface).render(CellRect::new(1, 0, 4, 1), &mut target);
        assert_eq!(target.cell((1, 0)).unwrap().symbol(), "x");
        assert_eq!(target.cell((3, 0)).unwrap().symbol(), "z");
    }
}
