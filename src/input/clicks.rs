/// What a mouse press amounts to once repeated clicks are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
    Triple,
}

/// Counts clicks landing on the same row within a time window.
///
/// Every click restarts the window. The count resets after a triple click,
/// so a fourth quick click starts over as a single.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTracker {
    window_ms: u64,
    last: Option<(u64, usize)>,
    count: u8,
}

impl ClickTracker {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last: None,
            count: 0,
        }
    }

    pub fn register(&mut self, row: usize, now_ms: u64) -> ClickKind {
        let count = match self.last {
            Some((at, last_row))
                if last_row == row && now_ms.saturating_sub(at) <= self.window_ms =>
            {
                self.count + 1
            }
            _ => 1,
        };
        self.last = Some((now_ms, row));

        match count {
            1 => {
                self.count = 1;
                ClickKind::Single
            }
            2 => {
                self.count = 2;
                ClickKind::Double
            }
            _ => {
                self.count = 0;
                ClickKind::Triple
            }
        }
    }

    pub const fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }
}
