//! Error types surfaced to the host.

use thiserror::Error;

/// Reasons the editor cannot be set up.
///
/// The editor never runs in a degraded mode; any of these aborts setup.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("no drawing surface was provided")]
    MissingSurface,
    #[error("no clipboard was provided")]
    MissingClipboard,
    #[error("no text measurer was provided")]
    MissingMeasurer,
    #[error("could not measure a glyph in font `{0}`")]
    Measurement(String),
    #[error("glyph metrics must be positive, got {width}x{height}")]
    InvalidMetrics { width: f32, height: f32 },
}

/// Clipboard failures.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard I/O failed")]
    Io(#[from] std::io::Error),
}
