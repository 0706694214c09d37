use super::cursor::{Cursor, Position, Selection};
use super::word;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Jump to a buffer position (clamped into bounds).
    Absolute { x: usize, y: usize },
}

/// Modifiers for [`TextBuffer::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOptions {
    /// Extend (or start) a selection instead of collapsing it.
    pub select: bool,
    /// Jump to the next/previous word boundary.
    pub by_word: bool,
    /// Jump to the line or document extremity.
    pub to_end: bool,
    /// For `Absolute`: add a cursor instead of replacing the set.
    pub add_cursor: bool,
}

impl MoveOptions {
    pub const fn select() -> Self {
        Self {
            select: true,
            by_word: false,
            to_end: false,
            add_cursor: false,
        }
    }
}

/// How much drawing a change needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Redraw {
    #[default]
    None,
    /// Recomposite cached layers and the caret.
    Quick,
    /// Retokenize and relayout the visible rows.
    Full,
}

/// Pending drawing work, polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedrawRequest {
    pub redraw: Redraw,
    pub scroll_into_view: bool,
}

impl RedrawRequest {
    pub fn merge(&mut self, redraw: Redraw, scroll_into_view: bool) {
        self.redraw = self.redraw.max(redraw);
        self.scroll_into_view |= scroll_into_view;
    }
}

/// The document rows plus an ordered set of cursors.
///
/// Every operation keeps each caret and anchor inside the document and
/// merges cursors whose ranges overlap or touch. Instead of calling into the
/// renderer, operations record a [`RedrawRequest`] that the frame loop
/// collects with [`TextBuffer::take_redraw`].
pub struct TextBuffer {
    rows: Vec<String>,
    cursors: Vec<Cursor>,
    current: usize,
    focused: bool,
    pending: RedrawRequest,
}

impl TextBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self {
            rows: vec![String::new()],
            cursors: vec![Cursor::default()],
            current: 0,
            focused: false,
            pending: RedrawRequest::default(),
        };
        buffer.load(text);
        buffer
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole document and reset to a single cursor at the origin.
    pub fn load(&mut self, text: &str) {
        self.rows = split_rows(text);
        self.cursors = vec![Cursor::default()];
        self.current = 0;
        self.request(Redraw::Full, true);
    }

    // --- Queries ---

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row(&self, y: usize) -> Option<&str> {
        self.rows.get(y).map(String::as_str)
    }

    /// Length of a row in chars (0 for rows past the end).
    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, |row| row.chars().count())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The full text, rows joined with `'\n'`.
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// The primary cursor (index 0).
    pub fn primary(&self) -> Cursor {
        self.cursors[0]
    }

    /// Index of the most recently placed cursor.
    pub const fn current_index(&self) -> usize {
        self.current
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// The normalized selection of one cursor.
    pub fn normalized_selection(&self, index: usize) -> Option<Selection> {
        self.cursors.get(index).map(Cursor::normalized)
    }

    /// Text spanned by the primary cursor's selection.
    pub fn selected_text(&self) -> String {
        let sel = self.primary().normalized();
        if sel.is_empty() {
            return String::new();
        }
        let first = &self.rows[sel.start_y];
        if sel.is_single_row() {
            return char_slice(first, sel.start_x, sel.end_x).to_string();
        }
        let mut out = String::from(char_slice(first, sel.start_x, usize::MAX));
        for row in &self.rows[sel.start_y + 1..sel.end_y] {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out.push_str(char_slice(&self.rows[sel.end_y], 0, sel.end_x));
        out
    }

    /// Take the drawing work recorded since the last call.
    pub fn take_redraw(&mut self) -> RedrawRequest {
        std::mem::take(&mut self.pending)
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.request(Redraw::Full, false);
    }

    // --- Editing ---

    /// Type `text` at every cursor, replacing active selections.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        for index in 0..self.cursors.len() {
            if self.cursors[index].has_selection() {
                self.remove_selection(index);
            }
        }
        for index in 0..self.cursors.len() {
            self.insert_at(index, text);
        }
        self.merge_cursors();
        self.request(Redraw::Full, true);
    }

    /// Type `text` at a single cursor, shifting the others.
    pub fn insert_text_at(&mut self, index: usize, text: &str) {
        if text.is_empty() || index >= self.cursors.len() {
            return;
        }
        if self.cursors[index].has_selection() {
            self.remove_selection(index);
        }
        self.insert_at(index, text);
        self.merge_cursors();
        self.request(Redraw::Full, true);
    }

    /// Pad every caret to the next even column: two spaces from an even
    /// column, one from an odd one. Each cursor pads from its own column.
    pub fn indent(&mut self) {
        for index in 0..self.cursors.len() {
            if self.cursors[index].has_selection() {
                self.remove_selection(index);
            }
        }
        for index in 0..self.cursors.len() {
            let pad = if self.cursors[index].x % 2 == 0 { "  " } else { " " };
            self.insert_at(index, pad);
        }
        self.merge_cursors();
        self.request(Redraw::Full, true);
    }

    /// Delete the selection or the character before every caret.
    ///
    /// At column 0 the row is joined onto the previous one. Returns `true`
    /// if anything was deleted.
    pub fn backspace(&mut self) -> bool {
        let mut changed = false;
        for index in 0..self.cursors.len() {
            changed |= self.backspace_at(index);
        }
        if changed {
            self.merge_cursors();
            self.request(Redraw::Full, true);
        }
        changed
    }

    /// Delete the selected range of one cursor.
    pub fn delete_selection(&mut self, index: usize) {
        if self.cursors.get(index).is_some_and(Cursor::has_selection) {
            self.remove_selection(index);
            self.merge_cursors();
            self.request(Redraw::Full, true);
        }
    }

    // --- Movement ---

    /// Move every cursor (or place one, for `Absolute`).
    ///
    /// Plain caret moves need only a quick redraw; moves that create, change
    /// or clear a selection repaint the selection background in full.
    pub fn move_cursor(&mut self, direction: Direction, options: MoveOptions) {
        let had_selection = self.cursors.iter().any(Cursor::has_selection);
        match direction {
            Direction::Absolute { x, y } => self.move_absolute(x, y, options),
            _ => {
                for index in 0..self.cursors.len() {
                    self.move_one(index, direction, options);
                }
            }
        }
        self.merge_cursors();
        let redraw = if had_selection || self.cursors.iter().any(Cursor::has_selection) {
            Redraw::Full
        } else {
            Redraw::Quick
        };
        self.request(redraw, true);
    }

    /// Select the word around the current cursor's caret.
    pub fn select_word(&mut self) {
        let cursor = self.cursors[self.current];
        let row = &self.rows[cursor.y];
        let start = word::word_start(row, cursor.x);
        let end = word::word_end(row, cursor.x);
        self.cursors[self.current] =
            Cursor::spanning(Position::new(start, cursor.y), Position::new(end, cursor.y));
        self.merge_cursors();
        self.request(Redraw::Full, false);
    }

    /// Select the current cursor's whole row.
    pub fn select_line(&mut self) {
        let y = self.cursors[self.current].y;
        self.cursors[self.current] =
            Cursor::spanning(Position::new(0, y), Position::new(self.row_len(y), y));
        self.merge_cursors();
        self.request(Redraw::Full, false);
    }

    /// Select the whole document with a single cursor.
    pub fn select_all(&mut self) {
        let last = self.rows.len() - 1;
        self.cursors = vec![Cursor::spanning(
            Position::new(0, 0),
            Position::new(self.row_len(last), last),
        )];
        self.current = 0;
        self.request(Redraw::Full, false);
    }

    // --- Private helpers ---

    fn request(&mut self, redraw: Redraw, scroll_into_view: bool) {
        self.pending.merge(redraw, scroll_into_view);
    }

    fn clamp(&self, x: usize, y: usize) -> Position {
        let y = y.min(self.rows.len() - 1);
        Position::new(x.min(self.row_len(y)), y)
    }

    fn insert_at(&mut self, index: usize, text: &str) {
        let at = self.cursors[index].caret();
        let pieces: Vec<&str> = text
            .split('\n')
            .map(|piece| piece.strip_suffix('\r').unwrap_or(piece))
            .collect();
        let breaks = pieces.len() - 1;
        let last_len = pieces[breaks].chars().count();

        let row = &self.rows[at.y];
        let split = byte_offset(row, at.x);
        let (before, after) = (row[..split].to_string(), row[split..].to_string());

        let caret = if breaks == 0 {
            self.rows[at.y] = format!("{before}{}{after}", pieces[0]);
            Position::new(at.x + last_len, at.y)
        } else {
            let mut replacement = Vec::with_capacity(pieces.len());
            replacement.push(format!("{before}{}", pieces[0]));
            replacement.extend(pieces[1..breaks].iter().map(|piece| (*piece).to_string()));
            replacement.push(format!("{}{after}", pieces[breaks]));
            self.rows.splice(at.y..=at.y, replacement);
            Position::new(last_len, at.y + breaks)
        };

        for (i, other) in self.cursors.iter_mut().enumerate() {
            if i != index {
                other.map_positions(|p| shift_after_insert(p, at, breaks, last_len));
            }
        }
        self.cursors[index] = Cursor::at(caret.x, caret.y);
    }

    fn backspace_at(&mut self, index: usize) -> bool {
        let cursor = self.cursors[index];
        if cursor.has_selection() {
            self.remove_selection(index);
            return true;
        }
        let caret = cursor.caret();
        let start = if caret.x > 0 {
            Position::new(caret.x - 1, caret.y)
        } else if caret.y > 0 {
            Position::new(self.row_len(caret.y - 1), caret.y - 1)
        } else {
            return false;
        };
        self.remove_range(index, start, caret);
        true
    }

    fn remove_selection(&mut self, index: usize) {
        let sel = self.cursors[index].normalized();
        self.remove_range(index, sel.start(), sel.end());
    }

    fn remove_range(&mut self, owner: usize, start: Position, end: Position) {
        let head = {
            let row = &self.rows[start.y];
            row[..byte_offset(row, start.x)].to_string()
        };
        let tail = {
            let row = &self.rows[end.y];
            row[byte_offset(row, end.x)..].to_string()
        };
        self.rows.splice(start.y..=end.y, std::iter::once(head + &tail));

        for (i, other) in self.cursors.iter_mut().enumerate() {
            if i != owner {
                other.map_positions(|p| shift_after_delete(p, start, end));
            }
        }
        self.cursors[owner] = Cursor::at(start.x, start.y);
    }

    fn move_one(&mut self, index: usize, direction: Direction, options: MoveOptions) {
        let cursor = self.cursors[index];
        let (x, y) = (cursor.x, cursor.y);
        let last = self.rows.len() - 1;

        let (target, prev_x) = match direction {
            Direction::Left => {
                let target = if options.to_end {
                    Position::new(0, y)
                } else if x > 0 {
                    let x = if options.by_word {
                        word::prev_boundary(&self.rows[y], x)
                    } else {
                        x - 1
                    };
                    Position::new(x, y)
                } else if y > 0 {
                    Position::new(self.row_len(y - 1), y - 1)
                } else {
                    cursor.caret()
                };
                (target, target.x)
            }
            Direction::Right => {
                let len = self.row_len(y);
                let target = if options.to_end {
                    Position::new(len, y)
                } else if x < len {
                    let x = if options.by_word {
                        word::next_boundary(&self.rows[y], x)
                    } else {
                        x + 1
                    };
                    Position::new(x, y)
                } else if y < last {
                    Position::new(0, y + 1)
                } else {
                    cursor.caret()
                };
                (target, target.x)
            }
            Direction::Up => {
                if options.to_end {
                    (Position::new(0, 0), 0)
                } else {
                    let y = y.saturating_sub(1);
                    (
                        Position::new(cursor.prev_x.min(self.row_len(y)), y),
                        cursor.prev_x,
                    )
                }
            }
            Direction::Down => {
                if options.to_end {
                    let len = self.row_len(last);
                    (Position::new(len, last), len)
                } else {
                    let y = (y + 1).min(last);
                    (
                        Position::new(cursor.prev_x.min(self.row_len(y)), y),
                        cursor.prev_x,
                    )
                }
            }
            Direction::Absolute { x, y } => {
                let target = self.clamp(x, y);
                (target, target.x)
            }
        };

        let cursor = &mut self.cursors[index];
        cursor.set_caret(target);
        cursor.prev_x = prev_x;
        if !options.select {
            cursor.collapse();
        }
    }

    fn move_absolute(&mut self, x: usize, y: usize, options: MoveOptions) {
        if options.select {
            self.move_one(self.current, Direction::Absolute { x, y }, options);
            return;
        }
        let target = self.clamp(x, y);
        let cursor = Cursor::at(target.x, target.y);
        if options.add_cursor {
            self.cursors.push(cursor);
            self.current = self.cursors.len() - 1;
        } else {
            self.cursors = vec![cursor];
            self.current = 0;
        }
    }

    /// Sort cursors and fold together any whose ranges overlap or touch.
    fn merge_cursors(&mut self) {
        let current = self.current;
        let mut tagged: Vec<(Cursor, bool)> = self
            .cursors
            .drain(..)
            .enumerate()
            .map(|(i, cursor)| (cursor, i == current))
            .collect();
        tagged.sort_by_key(|(cursor, _)| {
            let sel = cursor.normalized();
            (sel.start(), sel.end())
        });

        let mut merged: Vec<(Cursor, bool)> = Vec::with_capacity(tagged.len());
        for (cursor, is_current) in tagged {
            if let Some((last, last_current)) = merged.last_mut() {
                let a = last.normalized();
                let b = cursor.normalized();
                if b.start() <= a.end() {
                    let end = a.end().max(b.end());
                    let forward = if is_current {
                        cursor.is_forward()
                    } else {
                        last.is_forward()
                    };
                    *last = if forward {
                        Cursor::spanning(a.start(), end)
                    } else {
                        Cursor::spanning(end, a.start())
                    };
                    *last_current |= is_current;
                    continue;
                }
            }
            merged.push((cursor, is_current));
        }

        self.current = merged.iter().position(|(_, c)| *c).unwrap_or(0);
        self.cursors = merged.into_iter().map(|(cursor, _)| cursor).collect();
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("rows", &format_args!("{} rows", self.rows.len()))
            .field("cursors", &self.cursors)
            .field("current", &self.current)
            .field("focused", &self.focused)
            .finish()
    }
}

fn split_rows(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row).to_string())
        .collect()
}

/// Byte offset of char column `col` (the row length if past the end).
fn byte_offset(row: &str, col: usize) -> usize {
    row.char_indices().nth(col).map_or(row.len(), |(i, _)| i)
}

fn char_slice(row: &str, start: usize, end: usize) -> &str {
    let start = byte_offset(row, start);
    let end = byte_offset(row, end).max(start);
    &row[start..end]
}

fn shift_after_insert(p: Position, at: Position, breaks: usize, last_len: usize) -> Position {
    if p.y == at.y && p.x >= at.x {
        if breaks == 0 {
            Position::new(p.x + last_len, p.y)
        } else {
            Position::new(p.x - at.x + last_len, p.y + breaks)
        }
    } else if p.y > at.y {
        Position::new(p.x, p.y + breaks)
    } else {
        p
    }
}

fn shift_after_delete(p: Position, start: Position, end: Position) -> Position {
    if p <= start {
        p
    } else if p <= end {
        start
    } else if p.y == end.y {
        Position::new(start.x + (p.x - end.x), start.y)
    } else {
        Position::new(p.x, p.y - (end.y - start.y))
    }
}
