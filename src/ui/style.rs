//! Colors, fonts and the editor chrome palette.

use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A font description in CSS shorthand terms (`"13px Menlo, monospace"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size_px: f32,
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub fn new(size_px: f32, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
            bold: false,
            italic: false,
        }
    }

    /// Parse `"<size>px <family>"`. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let (size, family) = value.trim().split_once(' ')?;
        let size_px = size.strip_suffix("px")?.parse::<f32>().ok()?;
        let family = family.trim();
        if family.is_empty() || size_px <= 0.0 {
            return None;
        }
        Some(Self::new(size_px, family))
    }

    pub fn styled(&self, bold: bool, italic: bool) -> Self {
        Self {
            bold,
            italic,
            ..self.clone()
        }
    }

    /// CSS font shorthand, e.g. `"italic bold 13px Menlo"`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.italic {
            out.push_str("italic ");
        }
        if self.bold {
            out.push_str("bold ");
        }
        out.push_str(&format!("{}px {}", self.size_px, self.family));
        out
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(13.0, "Menlo, monospace")
    }
}

/// Colors for everything that isn't a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub line_number: Color,
    pub selection: Color,
    pub caret: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line_number: Color::rgb(0x77, 0x77, 0x77),
            selection: Color::rgb(0x55, 0x55, 0x55),
            caret: Color::rgb(0xdd, 0xdd, 0xdd),
        }
    }
}
