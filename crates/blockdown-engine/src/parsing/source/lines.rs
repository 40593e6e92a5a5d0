use super::span::{Position, SourceMap, TextSpan};

/// Finds the line that begins at `pos`.
///
/// Returns `(content_end, next_start)`: the offset of the line terminator (or
/// end of input) and the offset where the following line begins. `\n`, `\r\n`
/// and a lone `\r` all terminate a line.
pub fn line_bounds(bytes: &[u8], pos: usize) -> (usize, usize) {
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => return (i, i + 1),
            b'\r' => {
                let next = if bytes.get(i + 1) == Some(&b'\n') {
                    i + 2
                } else {
                    i + 1
                };
                return (i, next);
            }
            _ => i += 1,
        }
    }
    (bytes.len(), bytes.len())
}

/// A reference to a single line of a source view.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    /// Span of the line including its terminator.
    pub span: TextSpan,
    /// Span of the line excluding its terminator.
    pub content: TextSpan,
    /// The line text without its terminator.
    pub text: &'a str,
}

/// Returns an iterator over the lines of `text` with their byte spans.
///
/// Spans are shifted by `offset` so that lines of a sub-view report offsets
/// into the enclosing buffer.
pub fn lines_with_spans(text: &str, offset: usize) -> impl Iterator<Item = LineRef<'_>> + '_ {
    let bytes = text.as_bytes();
    let mut pos = 0usize;
    std::iter::from_fn(move || {
        if pos >= bytes.len() {
            return None;
        }
        let start = pos;
        let (content_end, next) = line_bounds(bytes, pos);
        pos = next;
        Some(LineRef {
            span: TextSpan::from_bounds(offset + start, offset + next),
            content: TextSpan::from_bounds(offset + start, offset + content_end),
            text: &text[start..content_end],
        })
    })
}

/// Maps byte offsets to 1-based line/column positions.
///
/// Built once per parse and shared by reference with every node
/// construction site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Scans `text` once, recording the start offset of every line.
    ///
    /// Offset 0 is always recorded, even for empty input.
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut pos = 0;
        while pos < bytes.len() {
            let (content_end, next) = line_bounds(bytes, pos);
            if content_end == bytes.len() {
                break;
            }
            line_starts.push(next);
            pos = next;
        }
        Self { line_starts }
    }

    /// Number of lines known to the index.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Start offset of the given 1-based line.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|i| self.line_starts.get(i).copied())
    }

    /// Returns the 1-based `(line, column)` of `offset`.
    ///
    /// Uses a binary search for the greatest line start `<= offset`. An empty
    /// index answers `(1, 1)`.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        if self.line_starts.is_empty() {
            return (1, 1);
        }
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts[idx];
        (idx + 1, offset - start + 1)
    }

    pub fn position(&self, offset: usize) -> Position {
        let (line, column) = self.locate(offset);
        Position::new(line, column)
    }

    /// Computes the source map of a span.
    pub fn source_map(&self, span: TextSpan) -> SourceMap {
        let start = self.position(span.start);
        if span.is_empty() {
            return SourceMap::new(start, start);
        }
        SourceMap::new(start, self.position(span.end()))
    }
}
