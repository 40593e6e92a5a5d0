use serde::Serialize;

use crate::parsing::source::{LineIndex, SourceMap, TextSpan};

use super::{
    kinds::{Alignment, FenceKind},
    token::TaskState,
};

/// What a syntax node represents, with kind-specific data.
///
/// Sub-spans (info strings, code content) index into the same buffer as the
/// node's own span and lie within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Document,
    Heading {
        level: u8,
    },
    Paragraph,
    List {
        ordered: bool,
        /// Starting number of an ordered list.
        start: Option<u32>,
    },
    ListItem {
        task: TaskState,
    },
    BlockQuote {
        depth: u8,
    },
    CodeBlock {
        fence: FenceKind,
        info: TextSpan,
        content: TextSpan,
    },
    ThematicBreak,
    HtmlBlock,
    CustomContainer {
        info: TextSpan,
        body: TextSpan,
    },
    Table {
        alignments: Vec<Alignment>,
    },
    TableRow {
        header: bool,
    },
    TableCell {
        alignment: Alignment,
    },
    Text,
}

impl NodeKind {
    /// Short human-readable label, e.g. `Heading(2)`.
    pub fn label(&self) -> String {
        match self {
            NodeKind::Document => "Document".into(),
            NodeKind::Heading { level } => format!("Heading({level})"),
            NodeKind::Paragraph => "Paragraph".into(),
            NodeKind::List {
                ordered: false, ..
            } => "List(bullet)".into(),
            NodeKind::List {
                ordered: true,
                start,
            } => format!("List(ordered, start={})", start.unwrap_or(1)),
            NodeKind::ListItem { task } => match task {
                TaskState::None => "ListItem".into(),
                other => format!("ListItem({other:?})"),
            },
            NodeKind::BlockQuote { depth } => format!("BlockQuote({depth})"),
            NodeKind::CodeBlock { fence, .. } => format!("CodeBlock({fence:?})"),
            NodeKind::ThematicBreak => "ThematicBreak".into(),
            NodeKind::HtmlBlock => "HtmlBlock".into(),
            NodeKind::CustomContainer { .. } => "CustomContainer".into(),
            NodeKind::Table { alignments } => format!("Table({alignments:?})"),
            NodeKind::TableRow { header: true } => "TableRow(header)".into(),
            NodeKind::TableRow { header: false } => "TableRow".into(),
            NodeKind::TableCell { alignment } => format!("TableCell({alignment:?})"),
            NodeKind::Text => "Text".into(),
        }
    }
}

/// A node of the block syntax tree.
///
/// Holds only coordinates: text is read through
/// [`Document::get_text`](crate::parsing::Document::get_text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: TextSpan,
    pub source_map: SourceMap,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Builds a node, computing its source map from `index`.
    pub fn new(
        kind: NodeKind,
        span: TextSpan,
        index: &LineIndex,
        children: Vec<SyntaxNode>,
    ) -> Self {
        Self {
            kind,
            span,
            source_map: index.source_map(span),
            children,
        }
    }

    pub fn leaf(kind: NodeKind, span: TextSpan, index: &LineIndex) -> Self {
        Self::new(kind, span, index, Vec::new())
    }

    pub fn text(span: TextSpan, index: &LineIndex) -> Self {
        Self::leaf(NodeKind::Text, span, index)
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }

    /// Pre-order traversal of this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Leaf `Text` descendants in source order.
    pub fn text_leaves(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.walk().filter(|n| n.is_text())
    }
}

/// Pre-order iterator returned by [`SyntaxNode::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<&'a SyntaxNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
