// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorConfig)
    clippy::module_name_repetitions
)]

//! # Scribe
//!
//! A canvas-style code editor core with a terminal host.
//!
//! Scribe keeps a multi-line text buffer with multiple cursors and
//! selections, and draws it onto an abstract pixel [`Surface`](ui::surface::Surface)
//! with syntax highlighting, a line-number gutter and a blinking caret.
//!
//! ## Architecture
//!
//! - **Buffer**: rows, cursors and selections; every mutation records the
//!   redraw it needs
//! - **Renderer**: viewport mapping, cached background and text layers,
//!   quick and full draws
//! - **Input**: host events turned into buffer and renderer operations
//! - **Editor**: the three wired to a surface, clipboard and clock
//!
//! ## Modules
//!
//! - [`app`]: The editor widget and the terminal host
//! - [`editor`]: Text buffer, cursors and word boundaries
//! - [`ui`]: Surfaces, viewport, caret blink and the renderer
//! - [`input`]: Input events, click classification and dispatch
//! - [`highlight`]: Lexers and themes
//! - [`clipboard`]: Clipboard access
//! - [`config`]: Editor settings and persisted flags

pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod input;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{Editor, EditorBuilder};
    pub use crate::clipboard::{Clipboard, MemoryClipboard};
    pub use crate::config::EditorConfig;
    pub use crate::editor::{Direction, MoveOptions, Position, TextBuffer};
    pub use crate::input::{InputEvent, Key, KeyEvent, Modifiers, MouseEvent};
    pub use crate::ui::surface::{RecordingSurface, Surface};
    pub use crate::ui::viewport::Viewport;
}
