//! Keyboard and mouse handling.
//!
//! Hosts translate their native events into [`InputEvent`]s; the
//! [`EventManager`] turns those into buffer and renderer operations.

mod clicks;
mod events;
mod manager;
mod platform;

pub use clicks::{ClickKind, ClickTracker};
pub use events::{CursorIcon, InputEvent, Key, KeyEvent, Modifiers, MouseEvent};
pub use manager::{EventManager, InputContext};
pub use platform::Platform;
