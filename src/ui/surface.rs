//! Drawing surfaces and cached layers.
//!
//! A [`Surface`] is whatever the host paints onto. [`Layer`]s are recorded
//! display lists that the renderer rebuilds on a full draw and replays on
//! every quick draw.

use super::style::{Color, Font};

/// An axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// `y` is the top of the line box.
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: Font,
        color: Color,
    },
}

/// The host's drawing target.
///
/// Coordinates passed to the fill methods are CSS pixels; the surface maps
/// them through whatever scale was last set with [`Surface::set_scale`].
pub trait Surface {
    /// Displayed size in CSS pixels.
    fn client_size(&self) -> (f32, f32);

    fn device_pixel_ratio(&self) -> f32;

    /// Resize the backing store, in device pixels.
    fn set_backing_size(&mut self, width: u32, height: u32);

    fn backing_size(&self) -> (u32, u32);

    fn set_scale(&mut self, scale: f32);

    /// Called before a frame is composited.
    fn begin_frame(&mut self) {}

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &Font, color: Color);

    /// Advance width of `text` in CSS pixels.
    fn measure_text(&self, text: &str, font: &Font) -> f32;

    fn apply(&mut self, op: &DrawOp) {
        match op {
            DrawOp::FillRect { rect, color } => self.fill_rect(*rect, *color),
            DrawOp::FillText {
                text,
                x,
                y,
                font,
                color,
            } => self.fill_text(text, *x, *y, font, *color),
        }
    }
}

/// An offscreen display list the size of the backing store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl Layer {
    pub const fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            ops: Vec::new(),
        }
    }

    /// Resize the layer; its contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.clear();
    }

    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    pub fn fill_text(&mut self, text: impl Into<String>, x: f32, y: f32, font: &Font, color: Color) {
        self.ops.push(DrawOp::FillText {
            text: text.into(),
            x,
            y,
            font: font.clone(),
            color,
        });
    }

    /// Replay the layer onto `surface`.
    pub fn composite_onto(&self, surface: &mut dyn Surface) {
        for op in &self.ops {
            surface.apply(op);
        }
    }
}

/// A headless surface that records every op of the current frame.
///
/// Text is measured as `chars * char_width`, matching a monospace grid.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    client_width: f32,
    client_height: f32,
    ratio: f32,
    backing: (u32, u32),
    scale: f32,
    char_width: f32,
    frames: usize,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub const fn new(client_width: f32, client_height: f32, char_width: f32) -> Self {
        Self {
            client_width,
            client_height,
            ratio: 1.0,
            backing: (0, 0),
            scale: 1.0,
            char_width,
            frames: 0,
            ops: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub const fn set_client_size(&mut self, width: f32, height: f32) {
        self.client_width = width;
        self.client_height = height;
    }

    /// Ops drawn since the last [`Surface::begin_frame`].
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub const fn frames(&self) -> usize {
        self.frames
    }

    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// All text runs of the current frame, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                DrawOp::FillRect { .. } => None,
            })
            .collect()
    }

    /// All rectangles of the current frame filled with `color`.
    pub fn rects_of(&self, color: Color) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn client_size(&self) -> (f32, f32) {
        (self.client_width, self.client_height)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn begin_frame(&mut self) {
        self.frames += 1;
        self.ops.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &Font, color: Color) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            font: font.clone(),
            color,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str, _font: &Font) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_layer_replays_in_order() {
        let font = Font::default();
        let mut layer = Layer::new();
        layer.resize(100, 50);
        layer.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RED);
        layer.fill_text("hi", 1.0, 2.0, &font, RED);

        let mut surface = RecordingSurface::new(100.0, 50.0, 7.0);
        surface.begin_frame();
        layer.composite_onto(&mut surface);

        assert_eq!(surface.ops(), layer.ops());
        assert_eq!(surface.texts(), vec!["hi"]);
    }

    #[test]
    fn test_layer_resize_discards_contents() {
        let mut layer = Layer::new();
        layer.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        layer.resize(20, 10);
        assert!(layer.is_empty());
        assert_eq!(layer.size(), (20, 10));
    }

    #[test]
    fn test_recording_surface_begin_frame_resets_ops() {
        let mut surface = RecordingSurface::new(10.0, 10.0, 1.0);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        surface.begin_frame();
        assert!(surface.ops().is_empty());
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_recording_surface_measures_monospace() {
        let surface = RecordingSurface::new(10.0, 10.0, 7.5);
        let w = surface.measure_text("abcd", &Font::default());
        assert!((w - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rects_of_filters_by_color() {
        let mut surface = RecordingSurface::new(10.0, 10.0, 1.0);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        surface.fill_rect(Rect::new(1.0, 0.0, 1.0, 1.0), Color::rgb(0, 0, 0));
        assert_eq!(surface.rects_of(RED), vec![Rect::new(0.0, 0.0, 1.0, 1.0)]);
    }
}
