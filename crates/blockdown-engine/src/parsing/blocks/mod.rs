//! # Block Parsing
//!
//! Two-phase block parsing over a borrowed [`SourceView`].
//!
//! ## Parsing Phases
//!
//! 1. **Tokenization** (`tokenizer`): one forward pass classifies each line
//!    (or multi-line run such as a fenced code block) into a `Token` carrying
//!    its span, line, column and packed kind-specific metadata.
//!
//! 2. **Assembly** (`assembler`): tokens, after any registered filters, are
//!    grouped into an ordered sequence of `SyntaxNode`s. Custom containers
//!    re-enter both phases over their interior.
//!
//! ## Modules
//!
//! - **`token`**: `Token`, `TokenKind`, `AuxValue`, `TaskState`
//! - **`kinds`**: per-construct recognisers (headings, fences, lists, tables...)
//! - **`tokenizer`**: `Tokenizer`, an iterator of tokens ending in `EndOfFile`
//! - **`assembler`**: `Assembler`, the token-to-tree grouping pass
//! - **`types`**: `SyntaxNode`, `NodeKind` and tree traversal
//!
//! ## Key Invariants
//!
//! - Nodes store spans into the backing buffer, never copied text
//! - Fenced code blocks are raw zones: no block parsing inside
//! - Malformed constructs degrade to paragraphs; assembly never fails

pub mod assembler;
pub mod kinds;
pub mod token;
pub mod tokenizer;
pub mod types;

pub use assembler::Assembler;
pub use token::{AuxValue, MAX_FENCE_LEN, MAX_ORDINAL, TaskState, Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use types::{NodeKind, SyntaxNode, Walk};

use super::{ParseContext, hooks::apply_filters, source::SourceView};

/// Tokenizes `view`, filters the tokens and assembles them.
///
/// Returns the segment's nodes and the number of tokens that survived
/// filtering. `depth` is the custom-container nesting level of the view.
pub fn assemble_segment(
    ctx: &ParseContext<'_>,
    view: SourceView<'_>,
    depth: usize,
) -> (Vec<SyntaxNode>, usize) {
    let tokens: Vec<Token> = Tokenizer::new(view, ctx.options.github_extensions)
        .filter_map(|token| apply_filters(ctx.filters, ctx.source, token))
        .collect();
    let nodes = Assembler::new(ctx, depth).assemble(&tokens);
    (nodes, tokens.len())
}
