use std::cmp::Ordering;

/// A (column, row) location in the buffer. Columns count `char`s.
///
/// Positions order by row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A caret plus the anchor of its (possibly empty) selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Caret column.
    pub x: usize,
    /// Caret row.
    pub y: usize,
    /// Remembered column for vertical movement (sticky column).
    pub prev_x: usize,
    /// Column of the fixed end of the selection.
    pub anchor_x: usize,
    /// Row of the fixed end of the selection.
    pub anchor_y: usize,
}

impl Cursor {
    /// A cursor with no selection at `(x, y)`.
    pub const fn at(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            prev_x: x,
            anchor_x: x,
            anchor_y: y,
        }
    }

    /// A cursor whose selection runs from `anchor` to `caret`.
    pub const fn spanning(anchor: Position, caret: Position) -> Self {
        Self {
            x: caret.x,
            y: caret.y,
            prev_x: caret.x,
            anchor_x: anchor.x,
            anchor_y: anchor.y,
        }
    }

    pub const fn caret(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub const fn anchor(&self) -> Position {
        Position::new(self.anchor_x, self.anchor_y)
    }

    pub const fn set_caret(&mut self, pos: Position) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub const fn set_anchor(&mut self, pos: Position) {
        self.anchor_x = pos.x;
        self.anchor_y = pos.y;
    }

    pub fn has_selection(&self) -> bool {
        self.caret() != self.anchor()
    }

    /// Drop the selection by moving the anchor onto the caret.
    pub const fn collapse(&mut self) {
        self.anchor_x = self.x;
        self.anchor_y = self.y;
    }

    /// Whether the caret sits at or after the anchor.
    pub fn is_forward(&self) -> bool {
        self.anchor() <= self.caret()
    }

    /// The selection with start and end in document order.
    pub fn normalized(&self) -> Selection {
        let (start, end) = if self.is_forward() {
            (self.anchor(), self.caret())
        } else {
            (self.caret(), self.anchor())
        };
        Selection {
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
        }
    }

    /// Apply `f` to both the caret and the anchor.
    pub(super) fn map_positions(&mut self, f: impl Fn(Position) -> Position) {
        self.set_caret(f(self.caret()));
        self.set_anchor(f(self.anchor()));
    }
}

/// A normalized selection range: `(start_x, start_y) <= (end_x, end_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
}

impl Selection {
    pub const fn start(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    pub const fn end(&self) -> Position {
        Position::new(self.end_x, self.end_y)
    }

    pub const fn is_empty(&self) -> bool {
        self.start_x == self.end_x && self.start_y == self.end_y
    }

    pub const fn is_single_row(&self) -> bool {
        self.start_y == self.end_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_orders_by_row_then_column() {
        assert!(Position::new(9, 0) < Position::new(0, 1));
        assert!(Position::new(2, 3) < Position::new(4, 3));
        assert_eq!(Position::new(1, 1).cmp(&Position::new(1, 1)), Ordering::Equal);
    }

    #[test]
    fn test_new_cursor_has_no_selection() {
        let cursor = Cursor::at(3, 2);
        assert!(!cursor.has_selection());
        assert_eq!(cursor.prev_x, 3);
        assert!(cursor.normalized().is_empty());
    }

    #[test]
    fn test_normalized_swaps_reversed_selection() {
        // anchor at (0,1), caret at (2,0)
        let cursor = Cursor::spanning(Position::new(0, 1), Position::new(2, 0));
        let sel = cursor.normalized();
        assert_eq!(
            sel,
            Selection {
                start_x: 2,
                start_y: 0,
                end_x: 0,
                end_y: 1
            }
        );
        assert!(!cursor.is_forward());
    }

    #[test]
    fn test_normalized_keeps_forward_selection() {
        let cursor = Cursor::spanning(Position::new(2, 0), Position::new(0, 1));
        let sel = cursor.normalized();
        assert_eq!(sel.start(), Position::new(2, 0));
        assert_eq!(sel.end(), Position::new(0, 1));
        assert!(!sel.is_single_row());
    }

    #[test]
    fn test_collapse_clears_selection() {
        let mut cursor = Cursor::spanning(Position::new(0, 0), Position::new(4, 0));
        assert!(cursor.has_selection());
        cursor.collapse();
        assert!(!cursor.has_selection());
        assert_eq!(cursor.anchor(), Position::new(4, 0));
    }
}
