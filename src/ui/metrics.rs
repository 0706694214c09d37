//! Glyph metrics for a monospace grid.

use unicode_width::UnicodeWidthChar;

use crate::error::SetupError;

use super::style::Font;

/// Measures a single reference glyph in a font.
///
/// Hosts typically back this with DOM or font-library measurement, which is
/// expensive, so the editor calls it once at setup.
pub trait TextMeasurer {
    /// Width and height in CSS pixels of one reference glyph, or `None` if
    /// the font cannot be measured.
    fn measure_glyph(&self, font: &Font) -> Option<(f32, f32)>;
}

/// Size of one character cell, used for all coordinate math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub letter_width: f32,
    pub letter_height: f32,
}

impl GlyphMetrics {
    pub const fn new(letter_width: f32, letter_height: f32) -> Self {
        Self {
            letter_width,
            letter_height,
        }
    }

    /// Measure `font` once; the row height is the glyph height scaled by
    /// `line_height_factor`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Measurement`] if the measurer cannot measure the
    /// font, or [`SetupError::InvalidMetrics`] for non-positive sizes.
    pub fn measure(
        measurer: &dyn TextMeasurer,
        font: &Font,
        line_height_factor: f32,
    ) -> Result<Self, SetupError> {
        let (width, height) = measurer
            .measure_glyph(font)
            .ok_or_else(|| SetupError::Measurement(font.css()))?;
        let height = height * line_height_factor;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SetupError::InvalidMetrics { width, height });
        }
        Ok(Self::new(width, height))
    }
}

/// How many grid cells a character occupies.
///
/// Canvas hosts draw every character in one cell. Terminals give wide
/// glyphs (CJK, most emoji) two cells and combining marks none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnModel {
    #[default]
    Chars,
    DisplayWidth,
}

impl ColumnModel {
    pub fn char_cells(self, ch: char) -> usize {
        match self {
            Self::Chars => 1,
            Self::DisplayWidth => UnicodeWidthChar::width(ch).unwrap_or(0),
        }
    }

    /// Cells spanned by the first `col` columns of `row`. Columns past the
    /// end of the row count one cell each.
    pub fn cells_before(self, row: &str, col: usize) -> usize {
        if self == Self::Chars {
            return col;
        }
        let mut chars = 0;
        let mut cells = 0;
        for ch in row.chars().take(col) {
            chars += 1;
            cells += self.char_cells(ch);
        }
        cells + (col - chars)
    }
}

/// A measurer that reports a fixed cell size.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeasurer {
    pub width: f32,
    pub height: f32,
}

impl TextMeasurer for FixedMeasurer {
    fn measure_glyph(&self, _font: &Font) -> Option<(f32, f32)> {
        Some((self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl TextMeasurer for Broken {
        fn measure_glyph(&self, _font: &Font) -> Option<(f32, f32)> {
            None
        }
    }

    #[test]
    fn test_display_width_counts_wide_glyphs_twice() {
        let model = ColumnModel::DisplayWidth;
        assert_eq!(model.cells_before("中x", 1), 2);
        assert_eq!(model.cells_before("中x", 2), 3);
        assert_eq!(model.cells_before("中x", 3), 4);
        assert_eq!(ColumnModel::Chars.cells_before("中x", 2), 2);
    }

    #[test]
    fn test_measure_applies_line_height_factor() {
        let m = FixedMeasurer {
            width: 8.0,
            height: 10.0,
        };
        let metrics = GlyphMetrics::measure(&m, &Font::default(), 1.1).unwrap();
        assert!((metrics.letter_width - 8.0).abs() < 1e-6);
        assert!((metrics.letter_height - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_measure_failure_is_setup_error() {
        let err = GlyphMetrics::measure(&Broken, &Font::default(), 1.0).unwrap_err();
        assert!(matches!(err, SetupError::Measurement(_)));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let m = FixedMeasurer {
            width: 0.0,
            height: 10.0,
        };
        let err = GlyphMetrics::measure(&m, &Font::default(), 1.0).unwrap_err();
        assert!(matches!(err, SetupError::InvalidMetrics { .. }));
    }
}
