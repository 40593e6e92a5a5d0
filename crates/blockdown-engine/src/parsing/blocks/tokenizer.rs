use crate::parsing::source::{SourceView, TextSpan, line_bounds};

use super::{
    kinds::{
        AtxHeading, BlockQuote, CodeFence, CustomContainer, HtmlStart, ListItem, Table,
        ThematicBreak,
    },
    token::{AuxValue, Token, TokenKind},
};

/// Single forward pass over a source view, producing one token per line or
/// per multi-line block.
///
/// Restartable only from the start of its view. Yields a final
/// [`TokenKind::EndOfFile`] token and then `None`.
pub struct Tokenizer<'a> {
    view: SourceView<'a>,
    github_extensions: bool,
    /// Byte position within the view's text.
    pos: usize,
    /// Line number of the line at `pos`, in whole-buffer coordinates.
    line: usize,
    prev: Option<TokenKind>,
    finished: bool,
}

/// One physical line, in view-local offsets.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    content_end: usize,
    next: usize,
    text: &'a str,
}

impl<'a> Tokenizer<'a> {
    pub fn new(view: SourceView<'a>, github_extensions: bool) -> Self {
        Self {
            view,
            github_extensions,
            pos: 0,
            line: view.first_line(),
            prev: None,
            finished: false,
        }
    }

    /// Produces the next token and whether more tokens may follow.
    ///
    /// Once the end of the view is reached every call returns an
    /// `EndOfFile` token paired with `false`.
    pub fn next_token(&mut self) -> (Token, bool) {
        let Some(first) = self.line_at(self.pos) else {
            self.finished = true;
            let eof = Token::new(
                TokenKind::EndOfFile,
                TextSpan::empty_at(self.view.span().end()),
                self.line,
                1,
            );
            return (eof, false);
        };

        let token = self.classify(first);
        self.prev = Some(token.kind);
        (token, true)
    }

    fn classify(&mut self, first: Line<'a>) -> Token {
        let text = first.text;
        let indent = text
            .bytes()
            .take_while(|c| *c == b' ' || *c == b'\t')
            .count();
        let column = indent + 1;

        if is_blank(text) {
            return self.single(TokenKind::BlankLine, first, 1, AuxValue::NONE);
        }

        if let Some(open) = CodeFence::open(text) {
            let last = self.consume_until(first, |line| {
                CodeFence::closes(line, open.kind, open.len)
            });
            return self.multi(
                TokenKind::FencedCodeBlock,
                first,
                last,
                column,
                AuxValue::fence(open.kind.marker(), open.len),
            );
        }

        if let Some(start) = HtmlStart::open(text) {
            let last = if start.terminates(text) {
                first
            } else {
                self.consume_html(first, start)
            };
            return self.multi(TokenKind::HtmlBlock, first, last, column, AuxValue::NONE);
        }

        if CustomContainer::fence(text).is_some() {
            let (last, closed) = self.consume_container(first);
            return self.multi(
                TokenKind::CustomContainer,
                first,
                last,
                column,
                AuxValue::closed(closed),
            );
        }

        if let Some((level, _)) = AtxHeading::parse(text) {
            return self.single(TokenKind::Heading, first, column, AuxValue::heading(level));
        }

        if ThematicBreak::matches(text) {
            return self.single(TokenKind::ThematicBreak, first, column, AuxValue::NONE);
        }

        if BlockQuote::is_start(text) {
            let (depth, _) = BlockQuote::strip_prefixes(text);
            return self.single(
                TokenKind::BlockQuote,
                first,
                column,
                AuxValue::quote_depth(depth),
            );
        }

        if let Some(marker) = ListItem::parse(text) {
            let kind = if marker.ordered {
                TokenKind::OrderedListItem
            } else {
                TokenKind::UnorderedListItem
            };
            return self.single(
                kind,
                first,
                column,
                AuxValue::list_marker(marker.ordinal, marker.task),
            );
        }

        if self.github_extensions && self.is_table_row(first) {
            return self.single(TokenKind::Table, first, column, AuxValue::NONE);
        }

        self.single(TokenKind::Text, first, column, AuxValue::NONE)
    }

    /// A row joins a table if it has a pipe and either contains `-`, follows a
    /// table row, or sits directly above a delimiter row.
    fn is_table_row(&self, line: Line<'a>) -> bool {
        if !Table::has_pipe(line.text) {
            return false;
        }
        if line.text.contains('-') || self.prev == Some(TokenKind::Table) {
            return true;
        }
        self.line_at(line.next)
            .is_some_and(|next| Table::is_delimiter_row(next.text))
    }

    fn line_at(&self, pos: usize) -> Option<Line<'a>> {
        let text = self.view.text();
        if pos >= text.len() {
            return None;
        }
        let (content_end, next) = line_bounds(text.as_bytes(), pos);
        Some(Line {
            start: pos,
            content_end,
            next,
            text: &text[pos..content_end],
        })
    }

    /// Consumes lines after `first` until `closes` matches (inclusive) or EOF.
    fn consume_until(&self, first: Line<'a>, closes: impl Fn(&str) -> bool) -> Line<'a> {
        let mut last = first;
        while let Some(line) = self.line_at(last.next) {
            last = line;
            if closes(line.text) {
                break;
            }
        }
        last
    }

    /// HTML blocks end before a blank line, at a terminator line, or at EOF.
    fn consume_html(&self, first: Line<'a>, start: HtmlStart) -> Line<'a> {
        let mut last = first;
        while let Some(line) = self.line_at(last.next) {
            if is_blank(line.text) {
                break;
            }
            last = line;
            if start.terminates(line.text) {
                break;
            }
        }
        last
    }

    /// Containers nest: `:::name` opens a level, a bare `:::` closes one.
    /// Fenced code inside a container is skipped so its lines cannot close it.
    fn consume_container(&self, first: Line<'a>) -> (Line<'a>, bool) {
        let mut depth = 1usize;
        let mut last = first;
        while let Some(line) = self.line_at(last.next) {
            last = line;
            if let Some(open) = CodeFence::open(line.text) {
                last = self.consume_until(line, |l| CodeFence::closes(l, open.kind, open.len));
                continue;
            }
            if let Some(fence) = CustomContainer::fence(line.text) {
                if fence.has_info {
                    depth += 1;
                } else {
                    depth -= 1;
                    if depth == 0 {
                        return (last, true);
                    }
                }
            }
        }
        (last, false)
    }

    fn single(&mut self, kind: TokenKind, line: Line<'a>, column: usize, aux: AuxValue) -> Token {
        self.multi(kind, line, line, column, aux)
    }

    /// Emits a token covering `first..=last` and advances past `last`.
    fn multi(
        &mut self,
        kind: TokenKind,
        first: Line<'a>,
        last: Line<'a>,
        column: usize,
        aux: AuxValue,
    ) -> Token {
        let offset = self.view.offset();
        let span = TextSpan::from_bounds(offset + first.start, offset + last.content_end);
        let token = Token::new(kind, span, self.line, column).with_aux(aux);

        let consumed = &self.view.text()[first.start..last.next];
        self.line += count_lines(consumed);
        self.pos = last.next;
        token
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token().0)
    }
}

/// Whitespace-only lines, using the same predicate as [`TextSpan::trim`].
fn is_blank(text: &str) -> bool {
    text.bytes().all(|c| c.is_ascii_whitespace())
}

/// Number of line terminators in `text`, counting `\r\n` once.
fn count_lines(text: &str) -> usize {
    let b = text.as_bytes();
    let mut n = 0;
    for (i, c) in b.iter().enumerate() {
        match c {
            b'\n' => n += 1,
            b'\r' if b.get(i + 1) != Some(&b'\n') => n += 1,
            _ => {}
        }
    }
    n
}
