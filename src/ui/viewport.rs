//! Viewport management for scrolling.
//!
//! The [`Viewport`] maps between buffer coordinates (row, column) and
//! surface pixels, and tracks which rows are visible.

use std::ops::Range;

use crate::editor::{Position, TextBuffer};

use super::metrics::{ColumnModel, GlyphMetrics};

/// The visible window over the document, in pixel terms.
///
/// Scrolling is tracked as a whole first row plus a sub-row pixel
/// remainder (`scroll_offset`), which is always in `0..letter_height`.
///
/// # Example
///
/// ```
/// use scribe::ui::metrics::GlyphMetrics;
/// use scribe::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(GlyphMetrics::new(8.0, 16.0), 10.0);
/// vp.set_height(180.0);
/// assert_eq!(vp.visible_rows(), 10);
///
/// vp.scroll_cursor_into_view(15);
/// assert_eq!(vp.first_visible_row(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    metrics: GlyphMetrics,
    padding: f32,
    first_visible_row: usize,
    scroll_offset: f32,
    visible_rows: usize,
    gutter_width: f32,
    columns: ColumnModel,
}

impl Viewport {
    /// Create a viewport showing a single row at the top of the document.
    pub fn new(metrics: GlyphMetrics, padding: f32) -> Self {
        let mut viewport = Self {
            metrics,
            padding,
            first_visible_row: 0,
            scroll_offset: 0.0,
            visible_rows: 1,
            gutter_width: 0.0,
            columns: ColumnModel::Chars,
        };
        viewport.update_gutter(1);
        viewport
    }

    #[must_use]
    pub const fn with_columns(mut self, columns: ColumnModel) -> Self {
        self.columns = columns;
        self
    }

    pub const fn columns(&self) -> ColumnModel {
        self.columns
    }

    pub const fn metrics(&self) -> GlyphMetrics {
        self.metrics
    }

    pub const fn padding(&self) -> f32 {
        self.padding
    }

    pub const fn first_visible_row(&self) -> usize {
        self.first_visible_row
    }

    pub const fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub const fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub const fn gutter_width(&self) -> f32 {
        self.gutter_width
    }

    // --- Coordinate mapping ---

    /// Left edge of column `col`.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_x(&self, col: usize) -> f32 {
        self.padding + self.gutter_width + col as f32 * self.metrics.letter_width
    }

    /// Left edge of column `col` in `row`, counting grid cells the way the
    /// column model does.
    pub fn to_x_at(&self, row: &str, col: usize) -> f32 {
        self.to_x(self.columns.cells_before(row, col))
    }

    /// Top edge of row `row`. Rows above the first visible row map to
    /// negative offsets from the padding.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_y(&self, row: usize) -> f32 {
        let rel = row as f32 - self.first_visible_row as f32;
        self.padding - self.scroll_offset + rel * self.metrics.letter_height
    }

    /// Map a pixel to the nearest buffer position, clamped into the document.
    ///
    /// Columns round to the nearest character boundary; rows floor.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn to_buffer(&self, px: f32, py: f32, buffer: &TextBuffer) -> Position {
        let cell = (px - self.padding - self.gutter_width) / self.metrics.letter_width;
        let rel = ((py - self.padding + self.scroll_offset) / self.metrics.letter_height).floor();

        let row = (self.first_visible_row as f32 + rel).max(0.0) as usize;
        let row = row.min(buffer.row_count().saturating_sub(1));
        let col = match self.columns {
            ColumnModel::Chars => cell.round().max(0.0) as usize,
            ColumnModel::DisplayWidth => self.nearest_column(buffer.row(row).unwrap_or(""), cell),
        };
        Position::new(col.min(buffer.row_len(row)), row)
    }

    /// The column whose left edge is nearest to `cell`; a glyph's midpoint
    /// belongs to the column after it.
    #[allow(clippy::cast_precision_loss)]
    fn nearest_column(&self, row: &str, cell: f32) -> usize {
        let mut left = 0.0;
        for (col, ch) in row.chars().enumerate() {
            let width = self.columns.char_cells(ch) as f32;
            if cell < left + width / 2.0 {
                return col;
            }
            left += width;
        }
        row.chars().count()
    }

    /// Whether `px` falls in the line-number gutter (or the padding left of it).
    pub fn in_gutter(&self, px: f32) -> bool {
        px < self.padding + self.gutter_width
    }

    /// Size the gutter for `row_count` rows: at least two digits wide.
    #[allow(clippy::cast_precision_loss)]
    pub fn update_gutter(&mut self, row_count: usize) {
        let digits = (row_count.max(1).ilog10() + 1).max(2);
        self.gutter_width = digits as f32 * self.metrics.letter_width;
    }

    /// Recompute how many whole rows fit in `height` CSS pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_height(&mut self, height: f32) {
        let rows = ((height - 2.0 * self.padding) / self.metrics.letter_height).floor();
        self.visible_rows = (rows.max(0.0) as usize).max(1);
    }

    /// Rows to draw: the visible rows plus `overscan` rows on each side,
    /// clamped to the document.
    pub fn rendered_rows(&self, row_count: usize, overscan: usize) -> Range<usize> {
        let start = self.first_visible_row.saturating_sub(overscan);
        let end = (self.first_visible_row + self.visible_rows + overscan + 1).min(row_count);
        start..end.max(start)
    }

    // --- Scrolling ---

    /// Scroll just enough to show `row`. Returns whether the viewport moved.
    pub fn scroll_cursor_into_view(&mut self, row: usize) -> bool {
        let last_visible = self.first_visible_row + self.visible_rows - 1;
        let first = if row > last_visible {
            row + 1 - self.visible_rows
        } else if row < self.first_visible_row {
            row
        } else {
            return false;
        };
        self.first_visible_row = first;
        self.scroll_offset = 0.0;
        true
    }

    /// Scroll by `delta` pixels (positive scrolls down). Whole rows move the
    /// first visible row; at either end of the document the remainder is
    /// dropped. Returns whether anything changed.
    pub fn scroll(&mut self, delta: f32, row_count: usize) -> bool {
        let before = (self.first_visible_row, self.scroll_offset);
        let max_first = self.max_first_row(row_count);
        let height = self.metrics.letter_height;

        self.scroll_offset += delta;
        while self.scroll_offset >= height {
            if self.first_visible_row >= max_first {
                self.scroll_offset = 0.0;
                break;
            }
            self.first_visible_row += 1;
            self.scroll_offset -= height;
        }
        while self.scroll_offset < 0.0 {
            if self.first_visible_row == 0 {
                self.scroll_offset = 0.0;
                break;
            }
            self.first_visible_row -= 1;
            self.scroll_offset += height;
        }
        // A tiny negative remainder can round up to a full row.
        if self.scroll_offset >= height {
            self.scroll_offset = 0.0;
        }
        if self.first_visible_row >= max_first && self.scroll_offset > 0.0 {
            self.first_visible_row = max_first;
            self.scroll_offset = 0.0;
        }

        #[allow(clippy::float_cmp)]
        let changed = before != (self.first_visible_row, self.scroll_offset);
        changed
    }

    /// Keep the first visible row inside a document of `row_count` rows.
    pub fn clamp(&mut self, row_count: usize) {
        let last = row_count.saturating_sub(1);
        if self.first_visible_row > last {
            self.first_visible_row = last;
            self.scroll_offset = 0.0;
        }
    }

    const fn max_first_row(&self, row_count: usize) -> usize {
        row_count.saturating_sub(self.visible_rows)
    }
}
