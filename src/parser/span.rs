//! Source location tracking for diagnostics.

use std::fmt;

/// A location in source text (byte offset, line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }

    /// Location of the first character of an input.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Advance past one character.
    pub(crate) fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span in source text (start and end locations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start location (inclusive)
    pub start: Location,
    /// End location (exclusive)
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a single location.
    pub fn point(at: Location) -> Self {
        Self { start: at, end: at }
    }

    /// Byte length of the span.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge two spans into one covering both.
    pub fn merge(self, other: Span) -> Span {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A value with an associated source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_advance_tracks_lines() {
        let mut loc = Location::start();
        for ch in "ab\ncd".chars() {
            loc.advance(ch);
        }

        assert_eq!(loc, Location::new(5, 2, 3));
    }

    #[test]
    fn test_location_advance_counts_chars_not_bytes() {
        let mut loc = Location::start();
        loc.advance('é');

        assert_eq!(loc.offset, 2);
        assert_eq!(loc.column, 2);
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(Location::new(0, 1, 1), Location::new(5, 1, 6));
        let b = Span::new(Location::new(6, 1, 7), Location::new(11, 1, 12));
        let merged = a.merge(b);

        assert_eq!(merged.start.offset, 0);
        assert_eq!(merged.end.offset, 11);
        assert_eq!(merged.len(), 11);
    }

    #[test]
    fn test_span_display() {
        let same_line = Span::new(Location::new(0, 3, 2), Location::new(4, 3, 6));
        let multi_line = Span::new(Location::new(0, 1, 1), Location::new(9, 2, 4));

        assert_eq!(same_line.to_string(), "3:2-6");
        assert_eq!(multi_line.to_string(), "1:1-2:4");
    }
}
