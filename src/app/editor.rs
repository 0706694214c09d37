//! The editor widget: buffer, renderer and input wired to a surface.

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::editor::TextBuffer;
use crate::error::SetupError;
use crate::highlight::{Lexer, MonokaiTheme, SyntectLexer, Theme};
use crate::input::{CursorIcon, EventManager, InputContext, InputEvent, Platform};
use crate::ui::Renderer;
use crate::ui::metrics::{GlyphMetrics, TextMeasurer};
use crate::ui::surface::Surface;

/// Collects the editor's collaborators; any order works.
pub struct EditorBuilder<S: Surface> {
    surface: Option<S>,
    clipboard: Option<Box<dyn Clipboard>>,
    measurer: Option<Box<dyn TextMeasurer>>,
    lexer: Option<Box<dyn Lexer>>,
    theme: Option<Box<dyn Theme>>,
    platform: Option<Platform>,
    config: EditorConfig,
    text: String,
}

impl<S: Surface> Default for EditorBuilder<S> {
    fn default() -> Self {
        Self {
            surface: None,
            clipboard: None,
            measurer: None,
            lexer: None,
            theme: None,
            platform: None,
            config: EditorConfig::default(),
            text: String::new(),
        }
    }
}

impl<S: Surface> EditorBuilder<S> {
    #[must_use]
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    #[must_use]
    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }

    #[must_use]
    pub fn measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Some(Box::new(measurer));
        self
    }

    /// Defaults to [`SyntectLexer`].
    #[must_use]
    pub fn lexer(mut self, lexer: impl Lexer + 'static) -> Self {
        self.lexer = Some(Box::new(lexer));
        self
    }

    /// Defaults to [`MonokaiTheme`].
    #[must_use]
    pub fn theme(mut self, theme: impl Theme + 'static) -> Self {
        self.theme = Some(Box::new(theme));
        self
    }

    /// Defaults to [`Platform::detect`].
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial document.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Measure the font, size the surface and draw the first frame.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if a required collaborator is missing or
    /// the font cannot be measured.
    pub fn build(self) -> Result<Editor<S>, SetupError> {
        let mut surface = self.surface.ok_or(SetupError::MissingSurface)?;
        let clipboard = self.clipboard.ok_or(SetupError::MissingClipboard)?;
        let measurer = self.measurer.ok_or(SetupError::MissingMeasurer)?;

        let config = self.config;
        let metrics =
            GlyphMetrics::measure(&*measurer, &config.font, config.line_height_factor)?;
        let lexer = self
            .lexer
            .unwrap_or_else(|| Box::new(SyntectLexer::new()) as Box<dyn Lexer>);
        let theme = self
            .theme
            .unwrap_or_else(|| Box::new(MonokaiTheme) as Box<dyn Theme>);

        let mut buffer = TextBuffer::from_text(&self.text);
        buffer.take_redraw();
        let mut renderer = Renderer::new(metrics, &config, lexer, theme);
        renderer.resize(&buffer, &mut surface);

        let platform = self.platform.unwrap_or_else(Platform::detect);
        tracing::debug!(
            letter_width = metrics.letter_width,
            letter_height = metrics.letter_height,
            ?platform,
            rows = buffer.row_count(),
            "editor ready"
        );

        Ok(Editor {
            buffer,
            renderer,
            events: EventManager::new(platform, config.click_ms),
            surface,
            clipboard,
            torn_down: false,
        })
    }
}

/// A running editor instance.
///
/// Everything happens synchronously inside [`Editor::handle_event`] and
/// [`Editor::frame`]; the host supplies the clock.
pub struct Editor<S: Surface> {
    buffer: TextBuffer,
    renderer: Renderer,
    events: EventManager,
    surface: S,
    clipboard: Box<dyn Clipboard>,
    torn_down: bool,
}

impl<S: Surface> Editor<S> {
    pub fn builder() -> EditorBuilder<S> {
        EditorBuilder::default()
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Direct buffer access for programmatic edits; they are drawn on the
    /// next frame.
    pub const fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub const fn hover_icon(&self) -> CursorIcon {
        self.events.hover_icon()
    }

    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub const fn set_canvas_origin(&mut self, x: f32, y: f32) {
        self.events.set_canvas_origin(x, y);
    }

    /// Replace the document; drawn on the next frame.
    pub fn load(&mut self, text: &str) {
        if self.torn_down {
            return;
        }
        self.events.teardown();
        self.buffer.load(text);
    }

    pub fn handle_event(&mut self, event: InputEvent, now_ms: u64) {
        if self.torn_down {
            return;
        }
        let mut ctx = InputContext {
            buffer: &mut self.buffer,
            renderer: &mut self.renderer,
            surface: &mut self.surface,
            clipboard: &mut *self.clipboard,
            now_ms,
        };
        self.events.handle(event, &mut ctx);
    }

    /// Per-frame work: insert coalesced text, carry out pending redraws and
    /// advance the caret blink. Returns whether anything was drawn.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        if self.torn_down {
            return false;
        }
        self.events.flush_text(&mut self.buffer);

        let before = self.renderer.stats();
        let request = self.buffer.take_redraw();
        self.renderer
            .present(request, &self.buffer, &mut self.surface, now_ms);
        self.renderer.tick(now_ms, &self.buffer, &mut self.surface);

        let after = self.renderer.stats();
        after.full_draws != before.full_draws || after.quick_draws != before.quick_draws
    }

    /// Stop blinking, drop pending input and ignore further events.
    pub fn teardown(&mut self) {
        self.renderer.cancel_blink();
        self.events.teardown();
        self.torn_down = true;
        tracing::debug!("editor torn down");
    }
}
