//! Token colors.

use crate::ui::style::Color;

/// Resolved look of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

/// Maps accumulated token types to a text style.
pub trait Theme {
    fn background(&self) -> Color;

    /// Color used when no type matches.
    fn foreground(&self) -> Color;

    /// Resolve `types` (outermost first). The last type with a known color
    /// wins; bold and italic stick once any type sets them.
    fn style(&self, types: &[&str]) -> TextStyle;
}

const BACKGROUND: Color = Color::rgb(0x2a, 0x2a, 0x2a);
const DEFAULT_TEXT: Color = Color::rgb(0x76, 0xd9, 0xe6);

const COLORS: &[(&[&str], Color)] = &[
    (&["comment", "prolog", "doctype", "cdata"], Color::rgb(0x6f, 0x70, 0x5e)),
    (&["null", "operator", "boolean", "number"], Color::rgb(0xbe, 0xbe, 0xc5)),
    (&["attr-name", "string", "entity", "url"], Color::rgb(0xe6, 0xd0, 0x6c)),
    (&["selector"], Color::rgb(0xa6, 0xe2, 0x2d)),
    (
        &["atrule", "attr-value", "control", "keyword", "directive", "important", "unit"],
        Color::rgb(0xf1, 0x33, 0x74),
    ),
    (&["function"], Color::rgb(0xa1, 0xdf, 0x02)),
    (&["regex", "statement"], Color::rgb(0x76, 0xd9, 0xe6)),
    (&["placeholder", "variable"], Color::rgb(0xff, 0xff, 0xff)),
    (&["punctuation"], Color::rgb(0xbe, 0xbe, 0xc5)),
];

const BOLDS: &[&str] = &["important", "statement", "bold"];
const ITALICS: &[&str] = &["italic"];

/// Monokai colors for Prism-style token types.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonokaiTheme;

impl MonokaiTheme {
    fn color_of(token_type: &str) -> Option<Color> {
        COLORS
            .iter()
            .find(|(types, _)| types.contains(&token_type))
            .map(|(_, color)| *color)
    }
}

impl Theme for MonokaiTheme {
    fn background(&self) -> Color {
        BACKGROUND
    }

    fn foreground(&self) -> Color {
        DEFAULT_TEXT
    }

    fn style(&self, types: &[&str]) -> TextStyle {
        let mut style = TextStyle {
            color: DEFAULT_TEXT,
            bold: false,
            italic: false,
        };
        for token_type in types {
            if let Some(color) = Self::color_of(token_type) {
                style.color = color;
            }
            style.bold |= BOLDS.contains(token_type);
            style.italic |= ITALICS.contains(token_type);
        }
        style
    }
}
