//! The editor widget and its terminal host.
//!
//! - [`Editor`]: buffer, renderer and input manager wired to a [`Surface`](crate::ui::surface::Surface)
//! - [`TerminalSurface`]: a surface backed by a ratatui buffer
//! - [`App::run`]: the crossterm event loop driving an editor in the terminal

mod editor;
mod event_loop;
mod input;
mod terminal;

pub use editor::{Editor, EditorBuilder};
pub use terminal::TerminalSurface;

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::ui::metrics::ColumnModel;

/// Runs a single editor full-screen in the terminal.
pub struct App {
    file_path: Option<PathBuf>,
    config: EditorConfig,
}

impl App {
    /// Create an application editing `file_path`, or an empty scratch
    /// buffer. A path that does not exist yet starts empty.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            config: EditorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }
}

/// Adapt a pixel-oriented config to terminal cells: one cell per glyph,
/// one row per line, and a thin gutter margin and caret.
pub fn terminal_config(config: &EditorConfig) -> EditorConfig {
    EditorConfig {
        padding: 2.0,
        line_height_factor: 1.0,
        caret_width: 1.0,
        columns: ColumnModel::DisplayWidth,
        ..config.clone()
    }
}

#[cfg(test)]
mod tests;
