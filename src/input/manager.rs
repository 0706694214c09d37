use crate::clipboard::Clipboard;
use crate::editor::{Direction, MoveOptions, TextBuffer};
use crate::ui::Renderer;
use crate::ui::surface::Surface;

use super::clicks::{ClickKind, ClickTracker};
use super::events::{CursorIcon, InputEvent, Key, KeyEvent, MouseEvent};
use super::platform::Platform;

/// Everything an input event may act on.
pub struct InputContext<'a> {
    pub buffer: &'a mut TextBuffer,
    pub renderer: &'a mut Renderer,
    pub surface: &'a mut dyn Surface,
    pub clipboard: &'a mut dyn Clipboard,
    pub now_ms: u64,
}

/// Translates input events into buffer and renderer operations.
///
/// Typed text is coalesced: [`InputEvent::Text`] only appends to a pending
/// string, which is inserted in one go before the next key or mouse event,
/// or when the frame loop calls [`EventManager::flush_text`].
#[derive(Debug)]
pub struct EventManager {
    platform: Platform,
    clicks: ClickTracker,
    pending_text: String,
    mouse_down: bool,
    hover: CursorIcon,
    origin: (f32, f32),
}

impl EventManager {
    pub const fn new(platform: Platform, click_window_ms: u64) -> Self {
        Self {
            platform,
            clicks: ClickTracker::new(click_window_ms),
            pending_text: String::new(),
            mouse_down: false,
            hover: CursorIcon::Default,
            origin: (0.0, 0.0),
        }
    }

    /// Where the surface's top-left corner sits in client coordinates.
    pub const fn set_canvas_origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    pub const fn hover_icon(&self) -> CursorIcon {
        self.hover
    }

    pub const fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    pub fn handle(&mut self, event: InputEvent, ctx: &mut InputContext<'_>) {
        if let InputEvent::Text(text) = event {
            self.pending_text.push_str(&text);
            return;
        }
        self.flush_text(ctx.buffer);

        match event {
            InputEvent::Key(key) => self.handle_key(key, ctx),
            InputEvent::MouseDown(mouse) => self.handle_mouse_down(mouse, ctx),
            InputEvent::MouseMove(mouse) => self.handle_mouse_move(mouse, ctx),
            InputEvent::MouseUp(_) => self.mouse_down = false,
            InputEvent::Wheel { delta_y } => {
                ctx.renderer.scroll(delta_y, ctx.buffer.row_count());
            }
            InputEvent::Resize => ctx.renderer.resize(ctx.buffer, ctx.surface),
            InputEvent::Focus => ctx.buffer.set_focused(true),
            InputEvent::Blur => {
                self.mouse_down = false;
                ctx.buffer.set_focused(false);
            }
            InputEvent::Text(_) => {}
        }
    }

    /// Insert any coalesced text.
    pub fn flush_text(&mut self, buffer: &mut TextBuffer) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        buffer.insert_text(&text);
    }

    /// Drop pending input and release the mouse.
    pub fn teardown(&mut self) {
        self.pending_text.clear();
        self.mouse_down = false;
        self.clicks.reset();
    }

    fn handle_key(&self, event: KeyEvent, ctx: &mut InputContext<'_>) {
        let mods = event.modifiers;
        let has_super = self.platform.has_super(mods);
        let options = MoveOptions {
            select: mods.shift,
            by_word: mods.alt,
            to_end: has_super,
            add_cursor: false,
        };
        let buffer = &mut *ctx.buffer;

        match event.key {
            Key::Left => buffer.move_cursor(Direction::Left, options),
            Key::Right => buffer.move_cursor(Direction::Right, options),
            Key::Up => buffer.move_cursor(Direction::Up, options),
            Key::Down => buffer.move_cursor(Direction::Down, options),
            Key::Home => buffer.move_cursor(
                Direction::Left,
                MoveOptions {
                    to_end: true,
                    ..options
                },
            ),
            Key::End => buffer.move_cursor(
                Direction::Right,
                MoveOptions {
                    to_end: true,
                    ..options
                },
            ),
            Key::Backspace => {
                buffer.backspace();
            }
            Key::Enter => buffer.insert_text("\n"),
            Key::Tab => buffer.indent(),
            Key::Char(c) if has_super => match c.to_ascii_lowercase() {
                'a' => buffer.select_all(),
                'c' => {
                    copy(buffer, ctx.clipboard);
                }
                'x' => {
                    if copy(buffer, ctx.clipboard) {
                        buffer.delete_selection(0);
                    }
                }
                'v' => paste(buffer, ctx.clipboard),
                _ => {}
            },
            Key::Char(_) | Key::Other => {}
        }
    }

    fn handle_mouse_down(&mut self, mouse: MouseEvent, ctx: &mut InputContext<'_>) {
        let (x, y) = self.local(mouse);
        let pos = ctx.renderer.viewport().to_buffer(x, y, ctx.buffer);
        ctx.buffer.move_cursor(
            Direction::Absolute { x: pos.x, y: pos.y },
            MoveOptions {
                add_cursor: mouse.modifiers.alt,
                ..MoveOptions::default()
            },
        );
        self.mouse_down = true;

        match self.clicks.register(pos.y, ctx.now_ms) {
            ClickKind::Single => {}
            ClickKind::Double => ctx.buffer.select_word(),
            ClickKind::Triple => ctx.buffer.select_line(),
        }
    }

    fn handle_mouse_move(&mut self, mouse: MouseEvent, ctx: &mut InputContext<'_>) {
        let (x, y) = self.local(mouse);
        let viewport = ctx.renderer.viewport();
        self.hover = if viewport.in_gutter(x) {
            CursorIcon::Default
        } else {
            CursorIcon::Text
        };
        if !self.mouse_down {
            return;
        }
        let pos = viewport.to_buffer(x, y, ctx.buffer);
        ctx.buffer
            .move_cursor(Direction::Absolute { x: pos.x, y: pos.y }, MoveOptions::select());
    }

    fn local(&self, mouse: MouseEvent) -> (f32, f32) {
        (mouse.x - self.origin.0, mouse.y - self.origin.1)
    }
}

/// Copy the primary selection. Returns whether anything was copied.
fn copy(buffer: &TextBuffer, clipboard: &mut dyn Clipboard) -> bool {
    let text = buffer.selected_text();
    if text.is_empty() {
        return false;
    }
    match clipboard.write_text(&text) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, "copy failed");
            false
        }
    }
}

fn paste(buffer: &mut TextBuffer, clipboard: &mut dyn Clipboard) {
    match clipboard.read_text() {
        Ok(text) => buffer.insert_text(&text.replace("\r\n", "\n")),
        Err(err) => tracing::warn!(%err, "paste failed"),
    }
}
