use std::{fmt, sync::Arc};

use super::{
    blocks::{SyntaxNode, Walk},
    pool::BufferPool,
    source::{LineIndex, SourceMap, TextSpan},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("document has been disposed")]
    Disposed,
    #[error("span {span:?} is outside the buffer (length {len})")]
    SpanOutOfBounds { span: TextSpan, len: usize },
    #[error("offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },
}

/// A parsed document: the syntax tree plus the pooled buffer its spans index.
///
/// The buffer goes back to its pool on [`dispose`](Document::dispose) or on
/// drop, whichever comes first. The tree and line index stay readable after
/// disposal; only text access fails.
pub struct Document {
    buffer: Option<String>,
    pool: Arc<dyn BufferPool>,
    line_index: LineIndex,
    root: SyntaxNode,
}

impl Document {
    pub(crate) fn new(
        buffer: String,
        pool: Arc<dyn BufferPool>,
        line_index: LineIndex,
        root: SyntaxNode,
    ) -> Self {
        Self {
            buffer: Some(buffer),
            pool,
            line_index,
            root,
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Top-level blocks.
    pub fn children(&self) -> &[SyntaxNode] {
        self.root.children()
    }

    /// Pre-order traversal starting at the root.
    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    /// The whole source text.
    pub fn text(&self) -> Result<&str, DocumentError> {
        self.buffer.as_deref().ok_or(DocumentError::Disposed)
    }

    /// Reads the text under `span` straight out of the backing buffer.
    pub fn get_text(&self, span: TextSpan) -> Result<&str, DocumentError> {
        let text = self.text()?;
        let end = match span.start.checked_add(span.len) {
            Some(end) if end <= text.len() => end,
            _ => {
                return Err(DocumentError::SpanOutOfBounds {
                    span,
                    len: text.len(),
                });
            }
        };
        for offset in [span.start, end] {
            if !text.is_char_boundary(offset) {
                return Err(DocumentError::NotCharBoundary { offset });
            }
        }
        Ok(&text[span.start..end])
    }

    pub fn source_map(&self, span: TextSpan) -> SourceMap {
        self.line_index.source_map(span)
    }

    /// 1-based `(line, column)` of a byte offset.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        self.line_index.locate(offset)
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn is_disposed(&self) -> bool {
        self.buffer.is_none()
    }

    /// Returns the buffer to its pool. Later calls do nothing.
    pub fn dispose(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.release(buffer);
        }
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.buffer.as_ref().map(String::len))
            .field("lines", &self.line_index.line_count())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
