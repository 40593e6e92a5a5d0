use log::{trace, warn};

use crate::parsing::{
    ParseContext,
    source::{SourceView, TextSpan, line_bounds, lines_with_spans},
};

use super::{
    assemble_segment,
    kinds::{
        Alignment, AtxHeading, BlockQuote, CodeFence, CustomContainer, FenceKind, ListItem,
        Table,
    },
    token::{Token, TokenKind},
    types::{NodeKind, SyntaxNode},
};

/// Groups one segment's tokens into block nodes.
///
/// A single linear scan with at most one token of lookahead, used for list
/// continuation across a blank line. Every non-blank token ends up in some
/// node: malformed constructs demote to paragraphs instead of failing.
pub struct Assembler<'c, 'a> {
    ctx: &'c ParseContext<'a>,
    /// Custom-container nesting depth of this segment (0 at top level).
    depth: usize,
}

impl<'c, 'a> Assembler<'c, 'a> {
    pub fn new(ctx: &'c ParseContext<'a>, depth: usize) -> Self {
        Self { ctx, depth }
    }

    pub fn assemble(&self, tokens: &[Token]) -> Vec<SyntaxNode> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let tok = tokens[i];
            i = match tok.kind {
                TokenKind::BlankLine | TokenKind::EndOfFile => i + 1,
                TokenKind::ThematicBreak => {
                    out.push(self.leaf(NodeKind::ThematicBreak, tok.span));
                    i + 1
                }
                TokenKind::HtmlBlock => {
                    out.push(self.leaf(NodeKind::HtmlBlock, tok.span));
                    i + 1
                }
                TokenKind::Heading => {
                    self.single_or_paragraph(tokens, i, self.heading(tok), &mut out)
                }
                TokenKind::FencedCodeBlock => {
                    self.single_or_paragraph(tokens, i, self.code_block(tok), &mut out)
                }
                TokenKind::CustomContainer => {
                    self.single_or_paragraph(tokens, i, self.container(tok), &mut out)
                }
                TokenKind::UnorderedListItem | TokenKind::OrderedListItem => {
                    self.push(self.list(tokens, i), &mut out)
                }
                TokenKind::BlockQuote => self.push(self.block_quote(tokens, i), &mut out),
                TokenKind::Table => self.push(self.table(tokens, i), &mut out),
                TokenKind::Text => self.push(self.paragraph(tokens, i), &mut out),
            };
        }
        out
    }

    fn push(&self, (node, next): (SyntaxNode, usize), out: &mut Vec<SyntaxNode>) -> usize {
        out.push(node);
        next
    }

    /// Emits `node` for a one-token construct, or demotes the token to a
    /// paragraph when its text no longer matches the construct.
    fn single_or_paragraph(
        &self,
        tokens: &[Token],
        i: usize,
        node: Option<SyntaxNode>,
        out: &mut Vec<SyntaxNode>,
    ) -> usize {
        match node {
            Some(node) => {
                out.push(node);
                i + 1
            }
            None => {
                trace!(
                    "demoting {:?} token at line {} to paragraph",
                    tokens[i].kind, tokens[i].line
                );
                self.push(self.paragraph(tokens, i), out)
            }
        }
    }

    fn heading(&self, tok: Token) -> Option<SyntaxNode> {
        let (parsed_level, content_start) = AtxHeading::parse(self.slice(tok.span))?;
        let level = match tok.aux.level() {
            l @ 1..=6 => l,
            _ => parsed_level,
        };
        let text = TextSpan::from_bounds(tok.span.start + content_start, tok.span.end())
            .trim(self.ctx.source);
        Some(self.node(
            NodeKind::Heading { level },
            tok.span,
            self.text_child(text).into_iter().collect(),
        ))
    }

    /// The first line (minus the fence) is the info string; the content runs
    /// from the next line up to the closing fence line, or to the end.
    fn code_block(&self, tok: Token) -> Option<SyntaxNode> {
        let (first_end, second_start) = self.first_line(tok.span);
        let open = CodeFence::open(self.slice(TextSpan::from_bounds(tok.span.start, first_end)))?;
        let (fence, len) = match FenceKind::from_marker(tok.aux.fence_marker()) {
            Some(kind) if tok.aux.fence_len() >= CodeFence::MIN_LEN => {
                (kind, tok.aux.fence_len())
            }
            _ => (open.kind, open.len),
        };

        let last_start = self.last_line_start(tok.span);
        let last_line = self.slice(TextSpan::from_bounds(last_start, tok.span.end()));
        let closed = last_start > tok.span.start && CodeFence::closes(last_line, fence, len);

        let info = TextSpan::from_bounds(tok.span.start + open.info_start, first_end)
            .trim(self.ctx.source);
        let content_start = second_start.min(tok.span.end());
        let content_end = if closed { last_start } else { tok.span.end() };
        let content = TextSpan::from_bounds(content_start, content_end);

        Some(self.leaf(
            NodeKind::CodeBlock {
                fence,
                info,
                content,
            },
            tok.span,
        ))
    }

    /// The interior is re-tokenized and assembled as a fresh segment whose
    /// line numbering starts at the container's first content line.
    fn container(&self, tok: Token) -> Option<SyntaxNode> {
        let (first_end, second_start) = self.first_line(tok.span);
        let fence =
            CustomContainer::fence(self.slice(TextSpan::from_bounds(tok.span.start, first_end)))?;

        let last_start = self.last_line_start(tok.span);
        let closed = tok.aux.is_closed() && last_start > tok.span.start;
        let body_start = second_start.min(tok.span.end());
        let body_end = if closed { last_start } else { tok.span.end() };
        let body = TextSpan::from_bounds(body_start, body_end);
        let info = TextSpan::from_bounds(tok.span.start + fence.info_start, first_end)
            .trim(self.ctx.source);

        let children = if body.is_empty() {
            Vec::new()
        } else if self.depth + 1 > self.ctx.max_container_depth {
            warn!(
                "custom container at line {} exceeds nesting limit {}; interior left unparsed",
                tok.line, self.ctx.max_container_depth
            );
            Vec::new()
        } else {
            let view = SourceView::sub(self.ctx.source, body, tok.line + 1);
            assemble_segment(self.ctx, view, self.depth + 1).0
        };

        Some(self.node(NodeKind::CustomContainer { info, body }, tok.span, children))
    }

    /// Groups contiguous items of one list kind. A single blank line between
    /// two items of the same kind does not break the group.
    fn list(&self, tokens: &[Token], i: usize) -> (SyntaxNode, usize) {
        let kind = tokens[i].kind;
        let mut items = Vec::new();
        let mut j = i;
        loop {
            items.push(self.list_item(tokens[j]));
            j += 1;
            if j < tokens.len() && tokens[j].kind == kind {
                continue;
            }
            if j + 1 < tokens.len()
                && tokens[j].kind == TokenKind::BlankLine
                && tokens[j + 1].kind == kind
            {
                j += 1;
                continue;
            }
            break;
        }

        let ordered = kind == TokenKind::OrderedListItem;
        let start = ordered.then(|| tokens[i].aux.ordinal());
        let span = tokens[i].span.cover(tokens[j - 1].span);
        (self.node(NodeKind::List { ordered, start }, span, items), j)
    }

    fn list_item(&self, tok: Token) -> SyntaxNode {
        let content_start = ListItem::parse(self.slice(tok.span))
            .map(|m| m.content_start)
            .unwrap_or(0);
        let text = TextSpan::from_bounds(tok.span.start + content_start, tok.span.end())
            .trim(self.ctx.source);
        self.node(
            NodeKind::ListItem {
                task: tok.aux.task_state(),
            },
            tok.span,
            self.text_child(text).into_iter().collect(),
        )
    }

    /// Each quoted line becomes one paragraph; empty quoted lines are skipped.
    fn block_quote(&self, tokens: &[Token], i: usize) -> (SyntaxNode, usize) {
        let end = run_end(tokens, i, TokenKind::BlockQuote);
        let mut depth = 0usize;
        let mut children = Vec::new();
        for tok in &tokens[i..end] {
            let (line_depth, offset) = BlockQuote::strip_prefixes(self.slice(tok.span));
            depth = depth.max(line_depth).max(usize::from(tok.aux.depth()));
            let content = TextSpan::from_bounds(tok.span.start + offset, tok.span.end())
                .trim(self.ctx.source);
            if let Some(text) = self.text_child(content) {
                children.push(self.node(NodeKind::Paragraph, content, vec![text]));
            }
        }
        let span = tokens[i].span.cover(tokens[end - 1].span);
        let depth = depth.min(u8::MAX as usize) as u8;
        (self.node(NodeKind::BlockQuote { depth }, span, children), end)
    }

    /// Row 0 is the header and row 1 must be a delimiter row; otherwise the
    /// whole run demotes to a paragraph.
    fn table(&self, tokens: &[Token], i: usize) -> (SyntaxNode, usize) {
        let end = run_end(tokens, i, TokenKind::Table);
        let rows = &tokens[i..end];
        let span = rows[0].span.cover(rows[rows.len() - 1].span);

        let valid = rows.len() >= 2 && Table::is_delimiter_row(self.slice(rows[1].span));
        if !valid {
            trace!("table at line {} has no delimiter row; demoting", rows[0].line);
            let children = rows.iter().flat_map(|t| self.line_texts(t.span)).collect();
            return (self.node(NodeKind::Paragraph, span, children), end);
        }

        let columns = Table::split_cells(self.slice(rows[0].span)).len();
        let mut alignments = Table::alignments(self.slice(rows[1].span));
        alignments.resize(columns, Alignment::Unspecified);

        let mut children = Vec::with_capacity(rows.len() - 1);
        children.push(self.node(
            NodeKind::TableRow { header: true },
            rows[0].span,
            self.cells(rows[0].span, &alignments, columns),
        ));
        for row in &rows[2..] {
            children.push(self.node(
                NodeKind::TableRow { header: false },
                row.span,
                self.cells(row.span, &alignments, columns),
            ));
        }

        (self.node(NodeKind::Table { alignments }, span, children), end)
    }

    /// Cells of one row, truncated to `columns`.
    fn cells(&self, row: TextSpan, alignments: &[Alignment], columns: usize) -> Vec<SyntaxNode> {
        Table::split_cells(self.slice(row))
            .into_iter()
            .take(columns)
            .enumerate()
            .map(|(col, range)| {
                let span = TextSpan::from_bounds(row.start + range.start, row.start + range.end);
                let alignment = alignments.get(col).copied().unwrap_or_default();
                self.node(
                    NodeKind::TableCell { alignment },
                    span,
                    self.text_child(span).into_iter().collect(),
                )
            })
            .collect()
    }

    /// Merges the token at `i` and the consecutive `Text` tokens after it into
    /// one paragraph with a `Text` child per line. A trailing blank line is
    /// consumed.
    fn paragraph(&self, tokens: &[Token], i: usize) -> (SyntaxNode, usize) {
        let mut end = i + 1;
        while end < tokens.len() && tokens[end].kind == TokenKind::Text {
            end += 1;
        }
        let span = tokens[i].span.cover(tokens[end - 1].span);
        let children = tokens[i..end]
            .iter()
            .flat_map(|t| self.line_texts(t.span))
            .collect();
        if end < tokens.len() && tokens[end].kind == TokenKind::BlankLine {
            end += 1;
        }
        (self.node(NodeKind::Paragraph, span, children), end)
    }

    /// One trimmed `Text` node per non-blank line of `span`.
    fn line_texts(&self, span: TextSpan) -> Vec<SyntaxNode> {
        lines_with_spans(self.slice(span), span.start)
            .filter_map(|line| self.text_child(line.content.trim(self.ctx.source)))
            .collect()
    }

    fn text_child(&self, span: TextSpan) -> Option<SyntaxNode> {
        (!span.is_empty()).then(|| SyntaxNode::text(span, self.ctx.line_index))
    }

    fn node(&self, kind: NodeKind, span: TextSpan, children: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::new(kind, span, self.ctx.line_index, children)
    }

    fn leaf(&self, kind: NodeKind, span: TextSpan) -> SyntaxNode {
        SyntaxNode::leaf(kind, span, self.ctx.line_index)
    }

    fn slice(&self, span: TextSpan) -> &'a str {
        self.ctx.source.get(span.start..span.end()).unwrap_or("")
    }

    /// `(end of first line, start of second line)` of a token span. The first
    /// is clamped to the span.
    fn first_line(&self, span: TextSpan) -> (usize, usize) {
        let (content_end, next) = line_bounds(self.ctx.source.as_bytes(), span.start);
        (content_end.min(span.end()), next)
    }

    fn last_line_start(&self, span: TextSpan) -> usize {
        self.slice(span)
            .rfind(['\n', '\r'])
            .map_or(span.start, |i| span.start + i + 1)
    }
}

fn run_end(tokens: &[Token], start: usize, kind: TokenKind) -> usize {
    tokens[start..]
        .iter()
        .position(|t| t.kind != kind)
        .map_or(tokens.len(), |n| start + n)
}
