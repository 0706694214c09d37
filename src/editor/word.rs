//! Word boundary scanning over a single row.
//!
//! Boundaries come from a fixed separator set; there is no locale or
//! Unicode-class awareness.

/// Characters that end a word.
pub const SEPARATORS: &str = " \t`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(c)
}

/// First index at or before `x` that follows a separator (or 0).
pub fn word_start(row: &str, x: usize) -> usize {
    let chars: Vec<char> = row.chars().collect();
    let mut i = x.min(chars.len());
    while i > 0 && !is_separator(chars[i - 1]) {
        i -= 1;
    }
    i
}

/// First separator at or after `x` (or the row length).
pub fn word_end(row: &str, x: usize) -> usize {
    let chars: Vec<char> = row.chars().collect();
    let mut i = x.min(chars.len());
    while i < chars.len() && !is_separator(chars[i]) {
        i += 1;
    }
    i
}

/// Target column for a word-wise move to the left.
///
/// Separators directly before `x` are skipped first so repeated moves make
/// progress.
pub fn prev_boundary(row: &str, x: usize) -> usize {
    let chars: Vec<char> = row.chars().collect();
    let mut i = x.min(chars.len());
    while i > 0 && is_separator(chars[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_separator(chars[i - 1]) {
        i -= 1;
    }
    i
}

/// Target column for a word-wise move to the right.
pub fn next_boundary(row: &str, x: usize) -> usize {
    let chars: Vec<char> = row.chars().collect();
    let mut i = x.min(chars.len());
    while i < chars.len() && is_separator(chars[i]) {
        i += 1;
    }
    while i < chars.len() && !is_separator(chars[i]) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_start_stops_after_separator() {
        assert_eq!(word_start("hello there", 8), 6);
        assert_eq!(word_start("foo.bar", 5), 4);
        assert_eq!(word_start("hello", 3), 0);
    }

    #[test]
    fn test_word_end_stops_at_separator() {
        assert_eq!(word_end("hello there", 2), 5);
        assert_eq!(word_end("foo(bar)", 4), 7);
        assert_eq!(word_end("hello", 1), 5);
    }

    #[test]
    fn test_next_boundary_from_row_start() {
        assert_eq!(next_boundary("hello there", 0), 5);
    }

    #[test]
    fn test_next_boundary_skips_leading_separators() {
        assert_eq!(next_boundary("hello there", 5), 11);
        assert_eq!(next_boundary("a  ,  b", 1), 7);
    }

    #[test]
    fn test_prev_boundary_skips_trailing_separators() {
        assert_eq!(prev_boundary("hello there", 6), 0);
        assert_eq!(prev_boundary("hello there", 11), 6);
    }

    #[test]
    fn test_scans_clamp_out_of_range_column() {
        assert_eq!(word_end("abc", 10), 3);
        assert_eq!(word_start("abc", 10), 0);
    }

    #[test]
    fn test_multibyte_columns_are_chars() {
        assert_eq!(next_boundary("café au", 0), 4);
    }
}
