use ratatui::style::Color as TermColor;

use crate::clipboard::MemoryClipboard;
use crate::config::EditorConfig;
use crate::editor::Position;
use crate::error::SetupError;
use crate::highlight::PlainLexer;
use crate::input::{CursorIcon, InputEvent, Key, KeyEvent, Modifiers, MouseEvent, Platform};
use crate::ui::metrics::{ColumnModel, FixedMeasurer};
use crate::ui::surface::RecordingSurface;

use super::event_loop::ResizeDebouncer;
use super::{Editor, EditorBuilder, TerminalSurface, terminal_config};

fn test_config() -> EditorConfig {
    EditorConfig {
        line_height_factor: 1.0,
        ..EditorConfig::default()
    }
}

/// 8x16 glyphs on a 400x180 surface: ten visible rows.
fn builder(text: &str) -> EditorBuilder<RecordingSurface> {
    Editor::builder()
        .surface(RecordingSurface::new(400.0, 180.0, 8.0))
        .clipboard(MemoryClipboard::new())
        .measurer(FixedMeasurer {
            width: 8.0,
            height: 16.0,
        })
        .lexer(PlainLexer)
        .platform(Platform::Other)
        .config(test_config())
        .text(text)
}

fn create_editor(text: &str) -> Editor<RecordingSurface> {
    builder(text).build().unwrap()
}

fn focused_editor(text: &str) -> Editor<RecordingSurface> {
    let mut editor = create_editor(text);
    editor.handle_event(InputEvent::Focus, 0);
    editor.frame(0);
    editor
}

fn key(editor: &mut Editor<RecordingSurface>, key: Key, modifiers: Modifiers) {
    editor.handle_event(InputEvent::Key(KeyEvent::new(key, modifiers)), 0);
}

fn cell_point(editor: &Editor<RecordingSurface>, col: usize, row: usize) -> MouseEvent {
    let vp = editor.renderer().viewport();
    MouseEvent::at(vp.to_x(col), vp.to_y(row) + 4.0)
}

fn caret_rects(editor: &Editor<RecordingSurface>) -> usize {
    editor
        .surface()
        .rects_of(test_config().palette.caret)
        .len()
}

fn numbered_rows(count: usize) -> String {
    (1..=count)
        .map(|i| format!("row {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Setup ---

#[test]
fn test_build_requires_surface() {
    let result = EditorBuilder::<RecordingSurface>::default()
        .clipboard(MemoryClipboard::new())
        .build();
    assert_eq!(result.err(), Some(SetupError::MissingSurface));
}

#[test]
fn test_build_requires_clipboard() {
    let result = Editor::builder()
        .surface(RecordingSurface::new(100.0, 100.0, 8.0))
        .measurer(FixedMeasurer {
            width: 8.0,
            height: 16.0,
        })
        .build();
    assert_eq!(result.err(), Some(SetupError::MissingClipboard));
}

#[test]
fn test_build_requires_measurer() {
    let result = Editor::builder()
        .surface(RecordingSurface::new(100.0, 100.0, 8.0))
        .clipboard(MemoryClipboard::new())
        .build();
    assert_eq!(result.err(), Some(SetupError::MissingMeasurer));
}

#[test]
fn test_build_rejects_zero_width_glyphs() {
    let result = builder("")
        .measurer(FixedMeasurer {
            width: 0.0,
            height: 16.0,
        })
        .build();
    assert_eq!(
        result.err(),
        Some(SetupError::InvalidMetrics {
            width: 0.0,
            height: 16.0
        })
    );
}

#[test]
fn test_build_draws_first_frame() {
    let editor = create_editor("hello\nworld");
    assert_eq!(editor.surface().frames(), 1);
    assert_eq!(editor.renderer().stats().full_draws, 1);
    assert_eq!(editor.surface().texts(), vec!["1", "hello", "2", "world"]);
    assert_eq!(editor.renderer().viewport().visible_rows(), 10);
}

#[test]
fn test_unfocused_editor_has_no_caret() {
    let mut editor = create_editor("hello");
    assert!(!editor.frame(0));
    assert_eq!(caret_rects(&editor), 0);
}

// --- Frames ---

#[test]
fn test_focus_draws_caret() {
    let editor = focused_editor("hello");
    assert!(editor.buffer().is_focused());
    assert_eq!(caret_rects(&editor), 1);
}

#[test]
fn test_frame_inserts_coalesced_text() {
    let mut editor = focused_editor("hello");
    editor.handle_event(InputEvent::Text("ab".to_string()), 5);
    editor.handle_event(InputEvent::Text("c".to_string()), 6);
    assert_eq!(editor.buffer().text(), "hello");

    assert!(editor.frame(16));
    assert_eq!(editor.buffer().text(), "abchello");
    assert_eq!(editor.buffer().primary().caret(), Position::new(3, 0));
    assert!(editor.surface().texts().contains(&"abchello"));
}

#[test]
fn test_idle_frame_draws_nothing() {
    let mut editor = focused_editor("hello");
    let frames = editor.surface().frames();
    assert!(!editor.frame(100));
    assert_eq!(editor.surface().frames(), frames);
}

#[test]
fn test_blink_hides_and_shows_caret() {
    let mut editor = focused_editor("hello");
    assert!(!editor.frame(250));
    assert!(editor.frame(500));
    assert_eq!(caret_rects(&editor), 0);
    assert!(editor.frame(1_000));
    assert_eq!(caret_rects(&editor), 1);
    assert_eq!(editor.renderer().stats().full_draws, 2);
}

#[test]
fn test_editing_resets_blink() {
    let mut editor = focused_editor("hello");
    assert!(editor.frame(500));
    assert_eq!(caret_rects(&editor), 0);

    key(&mut editor, Key::Right, Modifiers::NONE);
    assert!(editor.frame(600));
    assert_eq!(caret_rects(&editor), 1);
    // The period restarts from the move.
    assert!(!editor.frame(1_000));
    assert!(editor.frame(1_100));
}

#[test]
fn test_blur_removes_caret() {
    let mut editor = focused_editor("hello");
    editor.handle_event(InputEvent::Blur, 10);
    assert!(editor.frame(10));
    assert_eq!(caret_rects(&editor), 0);
}

// --- Mouse ---

#[test]
fn test_click_places_caret() {
    let mut editor = focused_editor("hello\nworld");
    let at = cell_point(&editor, 2, 1);
    editor.handle_event(InputEvent::MouseDown(at), 10);
    editor.handle_event(InputEvent::MouseUp(at), 20);
    assert_eq!(editor.buffer().primary().caret(), Position::new(2, 1));
}

#[test]
fn test_drag_selects_and_repaints_background() {
    let mut editor = focused_editor("hello world");
    let start = cell_point(&editor, 0, 0);
    let end = cell_point(&editor, 5, 0);
    editor.handle_event(InputEvent::MouseDown(start), 10);
    editor.handle_event(InputEvent::MouseMove(end), 20);
    editor.handle_event(InputEvent::MouseUp(end), 30);
    assert!(editor.frame(30));

    assert_eq!(editor.buffer().selected_text(), "hello");
    let selection = editor
        .surface()
        .rects_of(test_config().palette.selection);
    assert_eq!(selection.len(), 1);
    assert!((selection[0].width - 40.0).abs() < f32::EPSILON);
}

#[test]
fn test_canvas_origin_offsets_clicks() {
    let mut editor = focused_editor("hello");
    editor.set_canvas_origin(100.0, 50.0);
    let local = cell_point(&editor, 3, 0);
    let page = MouseEvent::at(local.x + 100.0, local.y + 50.0);
    editor.handle_event(InputEvent::MouseDown(page), 10);
    assert_eq!(editor.buffer().primary().caret(), Position::new(3, 0));
}

#[test]
fn test_hover_icon_tracks_gutter() {
    let mut editor = focused_editor("hello");
    editor.handle_event(InputEvent::MouseMove(MouseEvent::at(4.0, 20.0)), 0);
    assert_eq!(editor.hover_icon(), CursorIcon::Default);
    let text = cell_point(&editor, 1, 0);
    editor.handle_event(InputEvent::MouseMove(text), 0);
    assert_eq!(editor.hover_icon(), CursorIcon::Text);
}

// --- Scrolling ---

#[test]
fn test_moving_past_bottom_scrolls_into_view() {
    let mut editor = focused_editor(&numbered_rows(30));
    for _ in 0..15 {
        key(&mut editor, Key::Down, Modifiers::NONE);
    }
    assert!(editor.frame(10));
    assert_eq!(editor.renderer().viewport().first_visible_row(), 6);
    assert!(editor.surface().texts().contains(&"row 16"));
}

#[test]
fn test_wheel_scrolls_whole_rows() {
    let mut editor = focused_editor(&numbered_rows(30));
    let full = editor.renderer().stats().full_draws;
    editor.handle_event(InputEvent::Wheel { delta_y: 32.0 }, 10);
    assert!(editor.frame(10));
    assert_eq!(editor.renderer().viewport().first_visible_row(), 2);
    assert_eq!(editor.renderer().stats().full_draws, full + 1);
}

#[test]
fn test_resize_recomputes_visible_rows() {
    let mut editor = focused_editor(&numbered_rows(30));
    editor.surface_mut().set_client_size(400.0, 340.0);
    editor.handle_event(InputEvent::Resize, 10);
    assert_eq!(editor.renderer().viewport().visible_rows(), 20);
}

// --- Clipboard ---

#[test]
fn test_cut_then_paste_restores_text() {
    let mut editor = focused_editor("one\ntwo");
    key(&mut editor, Key::Char('a'), Modifiers::ctrl());
    key(&mut editor, Key::Char('x'), Modifiers::ctrl());
    assert_eq!(editor.buffer().text(), "");

    key(&mut editor, Key::Char('v'), Modifiers::ctrl());
    assert_eq!(editor.buffer().text(), "one\ntwo");
    assert_eq!(editor.buffer().primary().caret(), Position::new(3, 1));
}

// --- Lifecycle ---

#[test]
fn test_load_replaces_document() {
    let mut editor = focused_editor("hello");
    editor.handle_event(InputEvent::Text("pending".to_string()), 0);
    editor.load("a\nb\nc");
    assert!(editor.frame(10));
    assert_eq!(editor.buffer().text(), "a\nb\nc");
    assert_eq!(editor.buffer().primary().caret(), Position::new(0, 0));
    assert_eq!(editor.surface().texts(), vec!["1", "a", "2", "b", "3", "c"]);
}

#[test]
fn test_teardown_stops_everything() {
    let mut editor = focused_editor("hello");
    editor.handle_event(InputEvent::Text("x".to_string()), 0);
    editor.teardown();
    assert!(editor.is_torn_down());
    assert!(!editor.renderer().blink().is_running());

    editor.handle_event(InputEvent::Text("y".to_string()), 10);
    editor.load("other");
    assert!(!editor.frame(10_000));
    assert_eq!(editor.buffer().text(), "hello");
}

// --- Terminal host ---

#[test]
fn test_terminal_config_uses_cell_metrics() {
    let base = EditorConfig {
        language: "rust".to_string(),
        ..EditorConfig::default()
    };
    let config = terminal_config(&base);
    assert!((config.padding - 2.0).abs() < f32::EPSILON);
    assert!((config.line_height_factor - 1.0).abs() < f32::EPSILON);
    assert!((config.caret_width - 1.0).abs() < f32::EPSILON);
    assert_eq!(config.columns, ColumnModel::DisplayWidth);
    assert_eq!(config.language, "rust");
}

#[test]
fn test_terminal_editor_draws_into_cells() {
    let mut editor = Editor::builder()
        .surface(TerminalSurface::new(20, 6))
        .clipboard(MemoryClipboard::new())
        .measurer(FixedMeasurer {
            width: 1.0,
            height: 1.0,
        })
        .lexer(PlainLexer)
        .platform(Platform::Other)
        .config(terminal_config(&EditorConfig::default()))
        .text("abc")
        .build()
        .unwrap();
    editor.handle_event(InputEvent::Focus, 0);
    editor.frame(0);

    let buffer = editor.surface().buffer();
    // Padding 2, two-digit gutter: text starts at column 4 on row 2.
    assert_eq!(buffer.cell((2, 2)).unwrap().symbol(), "1");
    assert_eq!(buffer.cell((4, 2)).unwrap().symbol(), "a");
    assert_eq!(buffer.cell((6, 2)).unwrap().symbol(), "c");
    // The caret paints the cell under column 0.
    assert_eq!(buffer.cell((4, 2)).unwrap().bg, TermColor::Rgb(0xdd, 0xdd, 0xdd));
}

#[test]
fn test_terminal_click_maps_cells_to_columns() {
    let mut editor = Editor::builder()
        .surface(TerminalSurface::new(20, 6))
        .clipboard(MemoryClipboard::new())
        .measurer(FixedMeasurer {
            width: 1.0,
            height: 1.0,
        })
        .lexer(PlainLexer)
        .config(terminal_config(&EditorConfig::default()))
        .text("abc\ndef")
        .build()
        .unwrap();
    editor.handle_event(InputEvent::MouseDown(MouseEvent::at(6.0, 3.0)), 0);
    assert_eq!(editor.buffer().primary().caret(), Position::new(2, 1));
}

#[test]
fn test_terminal_caret_and_clicks_follow_wide_glyphs() {
    let mut editor = Editor::builder()
        .surface(TerminalSurface::new(20, 6))
        .clipboard(MemoryClipboard::new())
        .measurer(FixedMeasurer {
            width: 1.0,
            height: 1.0,
        })
        .lexer(PlainLexer)
        .platform(Platform::Other)
        .config(terminal_config(&EditorConfig::default()))
        .text("中x")
        .build()
        .unwrap();
    editor.handle_event(InputEvent::Focus, 0);
    editor.handle_event(
        InputEvent::Key(KeyEvent::new(Key::Right, Modifiers::NONE)),
        0,
    );
    editor.frame(10);

    // 中 fills cells 4 and 5; the caret sits on the cell that shows x.
    let buffer = editor.surface().buffer();
    let caret = TermColor::Rgb(0xdd, 0xdd, 0xdd);
    assert_eq!(buffer.cell((4, 2)).unwrap().symbol(), "中");
    assert_eq!(buffer.cell((6, 2)).unwrap().symbol(), "x");
    assert_eq!(buffer.cell((6, 2)).unwrap().bg, caret);
    assert_ne!(buffer.cell((5, 2)).unwrap().bg, caret);

    editor.handle_event(InputEvent::MouseDown(MouseEvent::at(6.0, 2.0)), 1_000);
    assert_eq!(editor.buffer().primary().caret(), Position::new(1, 0));
    editor.handle_event(InputEvent::MouseUp(MouseEvent::at(6.0, 2.0)), 1_010);
    editor.handle_event(InputEvent::MouseDown(MouseEvent::at(7.0, 2.0)), 2_000);
    assert_eq!(editor.buffer().primary().caret(), Position::new(2, 0));
}

// --- Resize debouncing ---

#[test]
fn test_resize_debouncer_waits_for_delay() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(80, 24, 1_000);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(1_050), None);
    assert_eq!(debouncer.take_ready(1_100), Some((80, 24)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_keeps_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(80, 24, 0);
    debouncer.queue(120, 40, 50);
    assert_eq!(debouncer.take_ready(120), None);
    assert_eq!(debouncer.take_ready(150), Some((120, 40)));
}

#[test]
fn test_resize_debouncer_empty() {
    let mut debouncer = ResizeDebouncer::new(100);
    assert_eq!(debouncer.take_ready(10_000), None);
}
