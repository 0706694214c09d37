use super::events::Modifiers;

/// Which modifier acts as the "super" key for editor shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Command (Meta) is the shortcut modifier.
    Mac,
    /// Control is the shortcut modifier.
    Other,
}

impl Platform {
    pub const fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    pub const fn has_super(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Mac => modifiers.meta,
            Self::Other => modifiers.ctrl,
        }
    }
}
