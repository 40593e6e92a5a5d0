//! # Extension Hooks
//!
//! Two seams let callers customize a parse without touching the core:
//!
//! - **Token filters** see every token between tokenizer and assembler and
//!   may rewrite or drop it. Dropped tokens never reach the tree.
//! - **Tree transformers** receive the finished root and return a
//!   replacement, in registration order.
//!
//! Closures of the right shape implement both traits.

use log::trace;

use super::blocks::{SyntaxNode, Token};

/// Rewrites or drops tokens before assembly.
pub trait TokenFilter: Send + Sync {
    /// Returns the (possibly modified) token, or `None` to drop it.
    fn filter(&self, source: &str, token: Token) -> Option<Token>;
}

impl<F> TokenFilter for F
where
    F: Fn(&str, Token) -> Option<Token> + Send + Sync,
{
    fn filter(&self, source: &str, token: Token) -> Option<Token> {
        self(source, token)
    }
}

/// Rewrites the assembled tree.
pub trait TreeTransformer: Send + Sync {
    fn transform(&self, root: SyntaxNode, source: &str) -> SyntaxNode;
}

impl<F> TreeTransformer for F
where
    F: Fn(SyntaxNode, &str) -> SyntaxNode + Send + Sync,
{
    fn transform(&self, root: SyntaxNode, source: &str) -> SyntaxNode {
        self(root, source)
    }
}

/// Runs `token` through every filter in order. The first `None` wins.
pub fn apply_filters(
    filters: &[Box<dyn TokenFilter>],
    source: &str,
    token: Token,
) -> Option<Token> {
    let kept = filters
        .iter()
        .try_fold(token, |tok, filter| filter.filter(source, tok));
    if kept.is_none() {
        trace!("token {:?} at line {} dropped by filter", token.kind, token.line);
    }
    kept
}

/// Folds `root` through every transformer in order.
pub fn apply_transformers(
    transformers: &[Box<dyn TreeTransformer>],
    root: SyntaxNode,
    source: &str,
) -> SyntaxNode {
    transformers
        .iter()
        .fold(root, |node, t| t.transform(node, source))
}
