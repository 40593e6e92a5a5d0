use std::{fmt, sync::Arc};

use log::debug;

use super::{
    ParseContext,
    blocks::{NodeKind, SyntaxNode, assemble_segment},
    document::Document,
    hooks::{TokenFilter, TreeTransformer, apply_transformers},
    options::ParseOptions,
    pool::{BufferPool, default_pool},
    source::{LineIndex, SourceView, TextSpan},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("max_container_depth must be at least 1")]
    ZeroContainerDepth,
}

/// A configured, reusable parser.
///
/// Holds no per-parse state, so one instance can serve parses on many
/// threads at once. The only shared mutable state is the buffer pool.
pub struct Pipeline {
    options: ParseOptions,
    pool: Arc<dyn BufferPool>,
    filters: Vec<Box<dyn TokenFilter>>,
    transformers: Vec<Box<dyn TreeTransformer>>,
    max_container_depth: usize,
}

impl Pipeline {
    pub const DEFAULT_MAX_CONTAINER_DEPTH: usize = 32;

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub(crate) fn from_parts(
        options: ParseOptions,
        pool: Arc<dyn BufferPool>,
        filters: Vec<Box<dyn TokenFilter>>,
        transformers: Vec<Box<dyn TreeTransformer>>,
    ) -> Self {
        Self {
            options,
            pool,
            filters,
            transformers,
            max_container_depth: Self::DEFAULT_MAX_CONTAINER_DEPTH,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn max_container_depth(&self) -> usize {
        self.max_container_depth
    }

    /// Parses `text` into a document backed by a buffer from this pipeline's
    /// pool. Never fails: malformed Markdown degrades to paragraphs.
    pub fn parse(&self, text: &str) -> Document {
        let mut buffer = self.pool.lease(text.len());
        buffer.push_str(text);

        let line_index = LineIndex::build(&buffer);
        let ctx = ParseContext {
            source: &buffer,
            line_index: &line_index,
            options: &self.options,
            filters: &self.filters,
            max_container_depth: self.max_container_depth,
        };
        let (children, token_count) = assemble_segment(&ctx, SourceView::whole(&buffer), 0);
        let root = SyntaxNode::new(
            NodeKind::Document,
            TextSpan::new(0, buffer.len()),
            &line_index,
            children,
        );
        let root = apply_transformers(&self.transformers, root, &buffer);

        debug!(
            "parsed {} bytes: {} lines, {} tokens, {} top-level blocks",
            buffer.len(),
            line_index.line_count(),
            token_count,
            root.children().len()
        );

        Document::new(buffer, self.pool.clone(), line_index, root)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            options: ParseOptions::default(),
            pool: default_pool(),
            filters: Vec::new(),
            transformers: Vec::new(),
            max_container_depth: Self::DEFAULT_MAX_CONTAINER_DEPTH,
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("filters", &self.filters.len())
            .field("transformers", &self.transformers.len())
            .field("max_container_depth", &self.max_container_depth)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Pipeline`]. Filters and transformers run in the order
/// they are added.
#[derive(Default)]
pub struct PipelineBuilder {
    options: ParseOptions,
    pool: Option<Arc<dyn BufferPool>>,
    filters: Vec<Box<dyn TokenFilter>>,
    transformers: Vec<Box<dyn TreeTransformer>>,
    max_container_depth: Option<usize>,
}

impl PipelineBuilder {
    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn pool(mut self, pool: Arc<dyn BufferPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn token_filter(mut self, filter: impl TokenFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn transformer(mut self, transformer: impl TreeTransformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn max_container_depth(mut self, depth: usize) -> Self {
        self.max_container_depth = Some(depth);
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let max_container_depth = self
            .max_container_depth
            .unwrap_or(Pipeline::DEFAULT_MAX_CONTAINER_DEPTH);
        if max_container_depth == 0 {
            return Err(PipelineError::ZeroContainerDepth);
        }
        Ok(Pipeline {
            options: self.options,
            pool: self.pool.unwrap_or_else(default_pool),
            filters: self.filters,
            transformers: self.transformers,
            max_container_depth,
        })
    }
}
