//! Host-neutral input events.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    #[must_use]
    pub const fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Enter,
    Tab,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// A mouse event in client (page) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Typed or composed text.
    Text(String),
    MouseDown(MouseEvent),
    MouseMove(MouseEvent),
    MouseUp(MouseEvent),
    /// Positive scrolls down, in CSS pixels.
    Wheel { delta_y: f32 },
    Resize,
    Focus,
    Blur,
}

/// Pointer shape the host should show over the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Text,
}
