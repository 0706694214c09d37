use std::ops::Range;
use std::time::{Duration, Instant};

use crate::config::EditorConfig;
use crate::editor::{Redraw, RedrawRequest, Selection, TextBuffer};
use crate::highlight::{Lexer, Theme, Token};

use super::blink::Blink;
use super::metrics::GlyphMetrics;
use super::style::{Font, Palette};
use super::surface::{Layer, Rect, Surface};
use super::viewport::Viewport;

/// Counters for the drawing pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub full_draws: u64,
    pub quick_draws: u64,
    pub rows_tokenized: u64,
    pub last_full_draw: Duration,
}

/// Draws a [`TextBuffer`] onto a [`Surface`].
///
/// A full draw rebuilds two cached layers: the background (fill and
/// selections) and the text (line numbers and highlighted rows). A quick
/// draw only replays those layers and draws the carets on top, so caret
/// movement and blinking never retokenize.
pub struct Renderer {
    viewport: Viewport,
    font: Font,
    palette: Palette,
    caret_width: f32,
    overscan: usize,
    language: String,
    lexer: Box<dyn Lexer>,
    theme: Box<dyn Theme>,
    background: Layer,
    text: Layer,
    blink: Blink,
    pending: Redraw,
    stats: RenderStats,
}

impl Renderer {
    pub fn new(
        metrics: GlyphMetrics,
        config: &EditorConfig,
        lexer: Box<dyn Lexer>,
        theme: Box<dyn Theme>,
    ) -> Self {
        Self {
            viewport: Viewport::new(metrics, config.padding).with_columns(config.columns),
            font: config.font.clone(),
            palette: config.palette,
            caret_width: config.caret_width,
            overscan: config.overscan,
            language: config.language.clone(),
            lexer,
            theme,
            background: Layer::new(),
            text: Layer::new(),
            blink: Blink::new(config.blink_ms),
            pending: Redraw::None,
            stats: RenderStats::default(),
        }
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    pub const fn blink(&self) -> &Blink {
        &self.blink
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        self.pending = Redraw::Full;
    }

    /// Take the drawing work the renderer itself asked for (scrolling).
    pub fn take_redraw(&mut self) -> Redraw {
        std::mem::take(&mut self.pending)
    }

    // --- Sizing and scrolling ---

    /// Size the backing store to the surface's client size times its pixel
    /// ratio, then full draw.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, buffer: &TextBuffer, surface: &mut dyn Surface) {
        let (width, height) = surface.client_size();
        let ratio = surface.device_pixel_ratio().max(0.1);
        let backing_w = (width * ratio).round().max(0.0) as u32;
        let backing_h = (height * ratio).round().max(0.0) as u32;

        surface.set_backing_size(backing_w, backing_h);
        self.background.resize(backing_w, backing_h);
        self.text.resize(backing_w, backing_h);
        surface.set_scale(ratio);
        self.viewport.set_height(height);
        tracing::debug!(width, height, ratio, rows = self.viewport.visible_rows(), "resize");
        self.full_draw(buffer, surface);
    }

    /// Scroll by `delta` pixels. Returns whether the viewport moved; if it
    /// did a full draw is pending.
    pub fn scroll(&mut self, delta: f32, row_count: usize) -> bool {
        let moved = self.viewport.scroll(delta, row_count);
        if moved {
            self.pending = Redraw::Full;
        }
        moved
    }

    // --- Frame work ---

    /// Carry out a redraw request. Any drawing resets the blink so the caret
    /// is visible right after an edit or move.
    pub fn present(
        &mut self,
        mut request: RedrawRequest,
        buffer: &TextBuffer,
        surface: &mut dyn Surface,
        now_ms: u64,
    ) {
        request.merge(self.take_redraw(), false);
        if request.scroll_into_view {
            let row = buffer
                .cursors()
                .get(buffer.current_index())
                .map_or(0, |cursor| cursor.y);
            if self.viewport.scroll_cursor_into_view(row) {
                request.merge(Redraw::Full, false);
            }
        }
        if request.redraw == Redraw::None {
            return;
        }
        self.blink.reset(now_ms);
        match request.redraw {
            Redraw::Full => self.full_draw(buffer, surface),
            Redraw::Quick => self.quick_draw(buffer, surface),
            Redraw::None => {}
        }
    }

    /// Advance the blink ticker; quick draws only when the caret flips.
    pub fn tick(&mut self, now_ms: u64, buffer: &TextBuffer, surface: &mut dyn Surface) -> bool {
        if !self.blink.tick(now_ms) {
            return false;
        }
        if buffer.is_focused() {
            self.quick_draw(buffer, surface);
        }
        true
    }

    pub const fn reset_blink(&mut self, now_ms: u64) {
        self.blink.reset(now_ms);
    }

    pub const fn cancel_blink(&mut self) {
        self.blink.cancel();
    }

    /// Rebuild both layers for the visible rows and composite.
    pub fn full_draw(&mut self, buffer: &TextBuffer, surface: &mut dyn Surface) {
        let _scope = crate::perf::scope("render.full_draw");
        let start = Instant::now();

        let row_count = buffer.row_count();
        self.viewport.update_gutter(row_count);
        self.viewport.clamp(row_count);
        let rows = self.viewport.rendered_rows(row_count, self.overscan);

        self.draw_background(buffer, surface, &rows);
        let tokenized = self.draw_text(buffer, surface, rows.clone());
        self.composite(buffer, surface);

        let elapsed = start.elapsed();
        self.stats.full_draws += 1;
        self.stats.rows_tokenized += tokenized;
        self.stats.last_full_draw = elapsed;
        tracing::debug!(
            first = rows.start,
            end = rows.end,
            tokenized,
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "full draw"
        );
        crate::perf::log_event(
            "render.full_draw",
            format!("rows={}..{} tokenized={tokenized}", rows.start, rows.end),
        );
    }

    /// Replay the cached layers and draw fresh carets.
    pub fn quick_draw(&mut self, buffer: &TextBuffer, surface: &mut dyn Surface) {
        if self.background.is_empty() {
            self.full_draw(buffer, surface);
            return;
        }
        self.composite(buffer, surface);
        self.stats.quick_draws += 1;
        tracing::trace!(cursors = buffer.cursors().len(), "quick draw");
    }

    fn composite(&self, buffer: &TextBuffer, surface: &mut dyn Surface) {
        surface.begin_frame();
        self.background.composite_onto(surface);
        self.text.composite_onto(surface);
        if buffer.is_focused() && self.blink.is_visible() {
            self.draw_carets(buffer, surface);
        }
    }

    fn draw_background(&mut self, buffer: &TextBuffer, surface: &dyn Surface, rows: &Range<usize>) {
        let (width, height) = surface.client_size();
        self.background.clear();
        self.background
            .fill_rect(Rect::new(0.0, 0.0, width, height), self.theme.background());

        for index in 0..buffer.cursors().len() {
            let Some(selection) = buffer.normalized_selection(index) else {
                continue;
            };
            if selection.is_empty() {
                continue;
            }
            for (row, from, to) in selection_spans(selection, buffer) {
                if !rows.contains(&row) {
                    continue;
                }
                let rect = self.cell_span(buffer.row(row).unwrap_or(""), row, from, to);
                self.background.fill_rect(rect, self.palette.selection);
            }
        }
    }

    /// Returns the number of rows handed to the lexer.
    fn draw_text(&mut self, buffer: &TextBuffer, surface: &dyn Surface, rows: Range<usize>) -> u64 {
        self.text.clear();
        let mut tokenized = 0;
        let number_right = self.viewport.gutter_width() + self.viewport.padding() / 2.0;

        for row in rows {
            let y = self.viewport.to_y(row);

            let number = (row + 1).to_string();
            let number_x = number_right - surface.measure_text(&number, &self.font);
            self.text
                .fill_text(number, number_x, y, &self.font, self.palette.line_number);

            let text = buffer.row(row).unwrap_or_default();
            if text.is_empty() {
                continue;
            }
            tokenized += 1;
            let Some(tokens) = self.lexer.tokenize(text, &self.language) else {
                tracing::debug!(row, language = %self.language, "row not tokenized");
                continue;
            };
            let mut pass = TextPass {
                layer: &mut self.text,
                surface,
                theme: self.theme.as_ref(),
                font: &self.font,
                x: self.viewport.to_x(0),
                y,
            };
            pass.draw(&tokens, &mut Vec::new());
        }
        tokenized
    }

    fn draw_carets(&self, buffer: &TextBuffer, surface: &mut dyn Surface) {
        let height = self.viewport.metrics().letter_height;
        for cursor in buffer.cursors() {
            let row = buffer.row(cursor.y).unwrap_or("");
            let x = self.viewport.to_x_at(row, cursor.x) - self.caret_width / 2.0;
            let y = self.viewport.to_y(cursor.y);
            surface.fill_rect(Rect::new(x, y, self.caret_width, height), self.palette.caret);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell_span(&self, text: &str, row: usize, from: usize, to: usize) -> Rect {
        let metrics = self.viewport.metrics();
        let columns = self.viewport.columns();
        let cells = columns
            .cells_before(text, to)
            .saturating_sub(columns.cells_before(text, from));
        Rect::new(
            self.viewport.to_x_at(text, from),
            self.viewport.to_y(row),
            cells as f32 * metrics.letter_width,
            metrics.letter_height,
        )
    }
}

/// Column spans `(row, from, to)` covered by a selection. Rows that the
/// selection continues past include one extra column for the line break.
pub fn selection_spans(selection: Selection, buffer: &TextBuffer) -> Vec<(usize, usize, usize)> {
    if selection.is_single_row() {
        return vec![(selection.start_y, selection.start_x, selection.end_x)];
    }
    let mut spans = Vec::with_capacity(selection.end_y - selection.start_y + 1);
    spans.push((
        selection.start_y,
        selection.start_x,
        buffer.row_len(selection.start_y) + 1,
    ));
    for row in selection.start_y + 1..selection.end_y {
        spans.push((row, 0, buffer.row_len(row) + 1));
    }
    spans.push((selection.end_y, 0, selection.end_x));
    spans
}

/// One row's worth of token drawing state.
struct TextPass<'a> {
    layer: &'a mut Layer,
    surface: &'a dyn Surface,
    theme: &'a dyn Theme,
    font: &'a Font,
    x: f32,
    y: f32,
}

impl TextPass<'_> {
    /// Draw `tokens` left to right; `types` holds the enclosing token types.
    fn draw<'t>(&mut self, tokens: &'t [Token], types: &mut Vec<&'t str>) {
        for token in tokens {
            match token {
                Token::Text(text) => {
                    let style = self.theme.style(types);
                    let font = self.font.styled(style.bold, style.italic);
                    self.layer.fill_text(text.as_str(), self.x, self.y, &font, style.color);
                    self.x += self.surface.measure_text(text, &font);
                }
                Token::Styled {
                    types: own,
                    children,
                } => {
                    let depth = types.len();
                    types.extend(own.iter().map(String::as_str));
                    self.draw(children, types);
                    types.truncate(depth);
                }
            }
        }
    }
}
