pub mod blocks;
pub mod document;
pub mod hooks;
pub mod options;
pub mod pipeline;
pub mod pool;
pub mod snapshot;
pub mod source;

#[cfg(test)]
mod tests;

pub use document::{Document, DocumentError};
pub use hooks::{TokenFilter, TreeTransformer};
pub use options::ParseOptions;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineError};
pub use pool::{BufferPool, SharedBufferPool, default_pool};

use source::LineIndex;

/// Read-only state shared by every segment of one parse.
///
/// The line index is built once per parse and borrowed by every node
/// construction site, including recursive container segments.
pub struct ParseContext<'a> {
    /// The whole backing buffer. Token and node spans index into it.
    pub source: &'a str,
    pub line_index: &'a LineIndex,
    pub options: &'a ParseOptions,
    pub filters: &'a [Box<dyn TokenFilter>],
    pub max_container_depth: usize,
}

/// One-shot parse with the process-wide buffer pool.
///
/// Builds a throwaway [`Pipeline`]; callers parsing repeatedly with the same
/// hooks should build one pipeline and reuse it.
pub fn parse(
    text: &str,
    options: ParseOptions,
    filters: Vec<Box<dyn TokenFilter>>,
    transformers: Vec<Box<dyn TreeTransformer>>,
) -> Document {
    Pipeline::from_parts(options, default_pool(), filters, transformers).parse(text)
}
