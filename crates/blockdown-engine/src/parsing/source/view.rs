use super::span::TextSpan;

/// A borrowed window onto the document buffer.
///
/// Recursive re-parses of nested regions tokenize a sub-view; `offset` and
/// `first_line` are the biases that keep token spans and line numbers
/// valid in the coordinates of the whole buffer.
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a> {
    /// The full backing buffer. Spans always index into this.
    source: &'a str,
    /// Byte offset of the view's first byte in `source`.
    offset: usize,
    /// Byte offset one past the view's last byte in `source`.
    end: usize,
    /// 1-based line number of the view's first line in `source`.
    first_line: usize,
}

impl<'a> SourceView<'a> {
    /// A view over an entire buffer.
    pub fn whole(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            end: source.len(),
            first_line: 1,
        }
    }

    /// A view over `span` of `source`, whose first line is `first_line`.
    ///
    /// The span is clamped to the buffer.
    pub fn sub(source: &'a str, span: TextSpan, first_line: usize) -> Self {
        let end = span.end().min(source.len());
        let offset = span.start.min(end);
        Self {
            source,
            offset,
            end,
            first_line,
        }
    }

    /// The text inside the view.
    pub fn text(&self) -> &'a str {
        self.source.get(self.offset..self.end).unwrap_or("")
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.offset, self.end)
    }

    /// Slices `span` out of the backing buffer; out-of-range spans yield "".
    pub fn slice(&self, span: TextSpan) -> &'a str {
        self.source.get(span.start..span.end()).unwrap_or("")
    }
}
