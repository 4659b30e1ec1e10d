/*
 * span.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Source locations for tokens.
//!
//! Spans are advisory: they feed error messages and trace output, never
//! parsing decisions.

use std::fmt;

/// A location in template source (0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Location {
    /// Move past `c`, updating row and column.
    pub(crate) fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.row += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

/// A range in template source from start (inclusive) to end (exclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    // Humans count rows and columns from 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.row + 1, self.start.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_rows_and_columns() {
        let mut loc = Location::default();
        for c in "ab\ncé".chars() {
            loc.advance(c);
        }
        assert_eq!(
            loc,
            Location {
                offset: 6,
                row: 1,
                column: 2,
            }
        );
    }

    #[test]
    fn test_span_display_is_one_based() {
        let start = Location {
            offset: 4,
            row: 0,
            column: 4,
        };
        let span = Span::new(start, start);
        assert_eq!(span.to_string(), "1:5");
    }
}
