//! Text buffer, cursors and selections.
//!
//! Provides a row-based text buffer with a multi-cursor set. Operations
//! never call into rendering; they record what needs redrawing and the
//! frame loop picks that up.

mod buffer;
mod cursor;
pub mod word;

pub use buffer::{Direction, MoveOptions, Redraw, RedrawRequest, TextBuffer};
pub use cursor::{Cursor, Position, Selection};
