//! Source location tracking for schema elements.
//!
//! Every literal and declaration carries a [`Loc`] so that errors raised
//! long after parsing (for example during constant emission) can still
//! point back at the offending source text.

use std::fmt;

/// A byte range plus line/column information within one source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice the spanned text out of the unit's source
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A location within a named compiled unit.
///
/// The `program` field is the bare name of the declaring unit (one `.ridl`
/// file), which doubles as the owning-unit identity used when resolving
/// qualified constant references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Loc {
    /// Name of the declaring unit, without extension
    pub program: String,
    /// Position within that unit's source
    pub span: Span,
}

impl Loc {
    /// Create a new location
    pub fn new(program: impl Into<String>, span: Span) -> Self {
        Self {
            program: program.into(),
            span,
        }
    }

    /// Name of the unit this location belongs to
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.program, self.span.line, self.span.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(4, 10, 1, 5);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3, 1, 4).is_empty());
    }

    #[test]
    fn test_span_slice() {
        let source = "const i32 X = 42";
        let span = Span::new(6, 9, 1, 7);
        assert_eq!(span.slice(source), "i32");
    }

    #[test]
    fn test_loc_display() {
        let loc = Loc::new("shared", Span::new(0, 3, 12, 7));
        assert_eq!(loc.to_string(), "shared:12:7");
        assert_eq!(loc.program(), "shared");
    }
}
