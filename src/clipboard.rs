//! Clipboard access.

use std::io::Write;

use base64::Engine;

use crate::error::ClipboardError;

/// System clipboard access used by copy, cut and paste.
pub trait Clipboard {
    /// Replace the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipboardError`] if the clipboard cannot be written.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Read the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipboardError`] if the clipboard cannot be read.
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// An in-process clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        text.clone_into(&mut self.contents);
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.contents.clone())
    }
}

/// Copies through the terminal with an OSC 52 escape sequence.
///
/// Terminals do not reliably answer OSC 52 queries, so paste returns the
/// text this clipboard last copied.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
    last: Option<String>,
}

impl<W: Write> Osc52Clipboard<W> {
    pub const fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        self.last = Some(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.last
            .clone()
            .ok_or_else(|| ClipboardError::Unavailable("nothing copied yet".to_string()))
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
