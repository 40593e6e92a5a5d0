use serde::Serialize;

/// A byte range `[start, start + len)` into the document's backing buffer.
///
/// All parsed nodes store spans rather than copied text, enabling lossless
/// round-trip: slicing the buffer with any span reproduces the exact source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TextSpan {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Length in bytes.
    pub len: usize,
}

impl TextSpan {
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Builds a span from a half-open `[start, end)` pair. Saturates to empty if reversed.
    #[inline]
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    /// An empty span positioned at `offset`.
    #[inline]
    pub const fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            len: 0,
        }
    }

    /// Exclusive end byte offset. Saturates at `usize::MAX`.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.start.saturating_add(self.len)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Returns true if `other` lies entirely within this span.
    #[inline]
    #[must_use]
    pub const fn contains_span(self, other: TextSpan) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }

    /// Returns the smallest span covering both.
    #[must_use]
    pub fn cover(self, other: TextSpan) -> TextSpan {
        TextSpan::from_bounds(self.start.min(other.start), self.end().max(other.end()))
    }

    /// Shrinks the span to exclude leading and trailing ASCII whitespace of `source`.
    ///
    /// `source` must be the full buffer the span indexes into. A span outside
    /// `source` is returned unchanged.
    #[must_use]
    pub fn trim(self, source: &str) -> TextSpan {
        let Some(bytes) = source.as_bytes().get(self.start..self.end()) else {
            return self;
        };
        let lead = bytes
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        let trail = bytes[lead..]
            .iter()
            .rev()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        TextSpan::new(self.start + lead, self.len - lead - trail)
    }
}

/// A position in source text, both components 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Line/column range of a span, used for diagnostics.
///
/// The end position is that of the exclusive end offset, so empty spans
/// collapse to `start == end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SourceMap {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl SourceMap {
    pub const fn new(start: Position, end: Position) -> Self {
        Self {
            start_line: start.line,
            start_col: start.column,
            end_line: end.line,
            end_col: end.column,
        }
    }

    pub const fn start(&self) -> Position {
        Position::new(self.start_line, self.start_col)
    }

    pub const fn end(&self) -> Position {
        Position::new(self.end_line, self.end_col)
    }
}

impl std::fmt::Display for SourceMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_end_is_exclusive() {
        let span = TextSpan::new(10, 5);
        assert_eq!(span.end(), 15);
        assert!(!span.is_empty());
    }

    #[test]
    fn from_bounds_saturates_reversed_pair() {
        let span = TextSpan::from_bounds(10, 4);
        assert_eq!(span, TextSpan::new(10, 0));
        assert!(span.is_empty());
    }

    #[test]
    fn contains_span_checks_both_ends() {
        let outer = TextSpan::new(0, 10);
        assert!(outer.contains_span(TextSpan::new(2, 3)));
        assert!(outer.contains_span(TextSpan::new(0, 10)));
        assert!(outer.contains_span(TextSpan::empty_at(10)));
        assert!(!outer.contains_span(TextSpan::new(8, 3)));
    }

    #[test]
    fn cover_merges_spans() {
        let merged = TextSpan::new(20, 10).cover(TextSpan::new(5, 3));
        assert_eq!(merged, TextSpan::from_bounds(5, 30));
    }

    #[test]
    fn trim_strips_surrounding_whitespace() {
        let src = "ab   hello \t\ncd";
        let span = TextSpan::from_bounds(2, 13);
        let trimmed = span.trim(src);
        assert_eq!(&src[trimmed.start..trimmed.end()], "hello");
    }

    #[test]
    fn trim_of_blank_span_is_empty() {
        let src = "x    y";
        let trimmed = TextSpan::from_bounds(1, 5).trim(src);
        assert!(trimmed.is_empty());
        assert_eq!(trimmed.start, 5);
    }

    #[test]
    fn end_saturates_instead_of_overflowing() {
        assert_eq!(TextSpan::new(usize::MAX, 1).end(), usize::MAX);
        assert!(!TextSpan::new(0, 3).contains_span(TextSpan::new(usize::MAX, 1)));
    }

    #[test]
    fn source_map_displays_compactly() {
        let map = SourceMap::new(Position::new(1, 1), Position::new(2, 4));
        assert_eq!(map.to_string(), "1:1-2:4");
    }
}
