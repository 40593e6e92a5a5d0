pub mod parsing;

// Re-export key types for easier usage
pub use parsing::{
    BufferPool, Document, DocumentError, ParseOptions, Pipeline, PipelineBuilder, PipelineError,
    SharedBufferPool, TokenFilter, TreeTransformer,
    blocks::{AuxValue, NodeKind, SyntaxNode, TaskState, Token, TokenKind},
    blocks::kinds::{Alignment, FenceKind},
    parse,
    source::{LineIndex, Position, SourceMap, TextSpan},
};
