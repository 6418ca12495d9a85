//! Input cursor over the text being matched

use serde::Serialize;

/// Position of the next unconsumed byte in the original input
///
/// A cursor never mutates: every successful match returns a new cursor, and
/// backtracking is simply keeping the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'t> {
    text: &'t str,
    offset: usize,
}

impl<'t> Cursor<'t> {
    /// Create a cursor at the start of `text`
    #[must_use]
    pub const fn new(text: &'t str) -> Self {
        Self { text, offset: 0 }
    }

    /// The full original input
    #[must_use]
    pub const fn text(&self) -> &'t str {
        self.text
    }

    /// Byte offset into the original input
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Text not yet consumed
    #[must_use]
    pub fn remaining(&self) -> &'t str {
        &self.text[self.offset..]
    }

    /// Check if all input has been consumed
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Cursor moved forward by `len` bytes
    ///
    /// `len` must land on a char boundary of the remaining text; regex match
    /// ends always do.
    #[must_use]
    pub fn advance(self, len: usize) -> Self {
        debug_assert!(self.text.is_char_boundary(self.offset + len));
        Self {
            text: self.text,
            offset: self.offset + len,
        }
    }

    /// Line and column of this cursor
    #[must_use]
    pub fn location(&self) -> Location {
        Location::locate(self.text, self.offset)
    }
}

/// Human-facing position (1-indexed line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Line number, starting at 1
    pub line: usize,
    /// Column in characters, starting at 1
    pub column: usize,
}

impl Location {
    /// Compute the location of a byte offset in `text`
    ///
    /// Offsets past the end are clamped to the end of the text.
    #[must_use]
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = &text[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
