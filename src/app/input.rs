use crossterm::event::{
    Event, KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent as TermMouseEvent, MouseEventKind,
};

use crate::input::{InputEvent, Key, KeyEvent, Modifiers, MouseEvent};

/// Rows scrolled per wheel notch, in cells.
pub(super) const WHEEL_STEP: f32 = 3.0;

/// What the terminal host should do with one crossterm event.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum HostAction {
    Input(InputEvent),
    /// Queue a debounced resize.
    Resize(u16, u16),
    Quit,
    Ignore,
}

pub(super) fn translate(event: Event) -> HostAction {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        // Terminals send pasted line breaks as bare carriage returns.
        Event::Paste(text) => {
            HostAction::Input(InputEvent::Text(text.replace("\r\n", "\n").replace('\r', "\n")))
        }
        Event::Resize(width, height) => HostAction::Resize(width, height),
        Event::FocusGained => HostAction::Input(InputEvent::Focus),
        Event::FocusLost => HostAction::Input(InputEvent::Blur),
    }
}

const fn modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        meta: mods.contains(KeyModifiers::SUPER) || mods.contains(KeyModifiers::META),
    }
}

fn translate_key(key: TermKeyEvent) -> HostAction {
    if key.kind == KeyEventKind::Release {
        return HostAction::Ignore;
    }
    let mods = modifiers(key.modifiers);

    let key = match key.code {
        KeyCode::Esc => return HostAction::Quit,
        KeyCode::Char('q') if mods.ctrl => return HostAction::Quit,
        // Plain characters are text; only chorded ones are shortcuts.
        KeyCode::Char(c) if !mods.ctrl && !mods.alt && !mods.meta => {
            return HostAction::Input(InputEvent::Text(c.to_string()));
        }
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        _ => Key::Other,
    };
    HostAction::Input(InputEvent::Key(KeyEvent::new(key, mods)))
}

fn translate_mouse(mouse: TermMouseEvent) -> HostAction {
    let at = MouseEvent::at(f32::from(mouse.column), f32::from(mouse.row))
        .with_modifiers(modifiers(mouse.modifiers));
    let event = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputEvent::MouseDown(at),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            InputEvent::MouseMove(at)
        }
        MouseEventKind::Up(MouseButton::Left) => InputEvent::MouseUp(at),
        MouseEventKind::ScrollDown => InputEvent::Wheel {
            delta_y: WHEEL_STEP,
        },
        MouseEventKind::ScrollUp => InputEvent::Wheel {
            delta_y: -WHEEL_STEP,
        },
        _ => return HostAction::Ignore,
    };
    HostAction::Input(event)
}
