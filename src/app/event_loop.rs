use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::editor::Editor;
use crate::app::input::{HostAction, translate};
use crate::app::terminal::TerminalSurface;
use crate::app::{App, terminal_config};
use crate::clipboard::Osc52Clipboard;
use crate::input::{InputEvent, Platform};
use crate::ui::metrics::FixedMeasurer;

type TerminalEditor = Editor<TerminalSurface>;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the editor in the terminal until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or the editor cannot be set up.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let read_scope = crate::perf::scope("app.read_file");
        let text = match &self.file_path {
            Some(path) if path.exists() => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            Some(path) => {
                tracing::info!(path = %path.display(), "new file");
                String::new()
            }
            None => String::new(),
        };
        drop(read_scope);

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; scribe requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let result = execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            EnableFocusChange
        )
        .context("Failed to enable terminal input modes")
        .and_then(|()| {
            let editor = TerminalEditor::builder()
                .surface(TerminalSurface::new(size.width, size.height))
                .clipboard(Osc52Clipboard::new(stdout()))
                .measurer(FixedMeasurer {
                    width: 1.0,
                    height: 1.0,
                })
                .platform(Platform::Other)
                .config(terminal_config(&self.config))
                .text(text)
                .build()
                .context("Failed to set up the editor")?;
            Self::event_loop(&mut terminal, editor)
        });

        let _ = execute!(
            stdout(),
            DisableFocusChange,
            DisableBracketedPaste,
            DisableMouseCapture
        );
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, mut editor: TerminalEditor) -> Result<()> {
        let start = Instant::now();
        let now = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        // Terminals only report focus changes, so assume we start focused.
        editor.handle_event(InputEvent::Focus, now());

        loop {
            let now_ms = now();
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                editor.surface_mut().set_client_size(width, height);
                editor.handle_event(InputEvent::Resize, now_ms);
            }

            if editor.frame(now_ms) {
                needs_render = true;
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| frame.render_widget(editor.surface(), frame.area()))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            let poll_ms = if resize_debouncer.is_pending() { 10 } else { 50 };
            if !event::poll(Duration::from_millis(poll_ms))? {
                continue;
            }

            // Coalesce bursts (key repeat, paste, drag) into one frame.
            let mut drained = 0_u32;
            loop {
                let event_ms = now();
                match translate(event::read()?) {
                    HostAction::Quit => {
                        editor.teardown();
                        return Ok(());
                    }
                    HostAction::Resize(width, height) => {
                        crate::perf::log_event(
                            "event.resize.queue",
                            format!("width={width} height={height}"),
                        );
                        resize_debouncer.queue(width, height, event_ms);
                    }
                    HostAction::Input(input) => {
                        drained += 1;
                        editor.handle_event(input, event_ms);
                    }
                    HostAction::Ignore => {}
                }
                if !event::poll(Duration::from_millis(0))? {
                    break;
                }
            }
            if drained > 1 {
                crate::perf::log_event("event.drain", format!("frame={frame_idx} drained={drained}"));
            }
        }
    }
}

