use serde::Serialize;

use crate::parsing::source::TextSpan;

/// Largest ordered-list ordinal that can be represented. Larger values clamp.
pub const MAX_ORDINAL: u32 = 999_999_999;

/// Largest fence run length that can be represented. Longer runs clamp.
pub const MAX_FENCE_LEN: usize = 0x00FF_FFFF;

/// The classification of one logical line or multi-line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    BlankLine,
    Text,
    Heading,
    ThematicBreak,
    BlockQuote,
    FencedCodeBlock,
    HtmlBlock,
    CustomContainer,
    UnorderedListItem,
    OrderedListItem,
    /// A table row candidate; header/delimiter/body is decided by the assembler.
    Table,
    EndOfFile,
}

/// Status of a GFM task-list checkbox on a list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TaskState {
    /// No checkbox present.
    #[default]
    None,
    /// `[ ]`
    Incomplete,
    /// `[x]` or `[X]`
    Complete,
}

impl TaskState {
    const fn to_bits(self) -> u32 {
        match self {
            TaskState::None => 0,
            TaskState::Incomplete => 1,
            TaskState::Complete => 2,
        }
    }

    const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            1 => TaskState::Incomplete,
            2 => TaskState::Complete,
            _ => TaskState::None,
        }
    }
}

/// Kind-specific token metadata packed into one integer.
///
/// Layouts by token kind:
/// - `Heading`: level (1..=6)
/// - `BlockQuote`: nesting depth
/// - `FencedCodeBlock`: fence byte in the low 8 bits, run length above
/// - list items: task state in the low 2 bits, ordinal above (0 for bullets)
/// - `CustomContainer`: 1 if a closing fence was found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AuxValue(u32);

impl AuxValue {
    pub const NONE: AuxValue = AuxValue(0);

    pub const fn heading(level: u8) -> Self {
        AuxValue(level as u32)
    }

    pub fn quote_depth(depth: usize) -> Self {
        AuxValue(depth.min(u8::MAX as usize) as u32)
    }

    pub fn fence(marker: u8, len: usize) -> Self {
        AuxValue(marker as u32 | ((len.min(MAX_FENCE_LEN) as u32) << 8))
    }

    /// Packs a list marker. Ordinals above [`MAX_ORDINAL`] clamp.
    pub fn list_marker(ordinal: u64, task: TaskState) -> Self {
        let ordinal = ordinal.min(MAX_ORDINAL as u64) as u32;
        AuxValue((ordinal << 2) | task.to_bits())
    }

    pub const fn closed(closed: bool) -> Self {
        AuxValue(closed as u32)
    }

    pub const fn level(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn depth(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn fence_marker(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn fence_len(self) -> usize {
        (self.0 >> 8) as usize
    }

    pub const fn ordinal(self) -> u32 {
        self.0 >> 2
    }

    pub const fn task_state(self) -> TaskState {
        TaskState::from_bits(self.0)
    }

    pub const fn is_closed(self) -> bool {
        self.0 & 1 == 1
    }
}

/// The unit the tokenizer emits. Transient: consumed by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Covers the whole line (or line run) without the final line terminator.
    pub span: TextSpan,
    /// 1-based line of the token's first line, in whole-buffer coordinates.
    pub line: usize,
    /// 1-based column of the first non-whitespace byte.
    pub column: usize,
    pub aux: AuxValue,
}

impl Token {
    pub fn new(kind: TokenKind, span: TextSpan, line: usize, column: usize) -> Self {
        Self {
            kind,
            span,
            line,
            column,
            aux: AuxValue::NONE,
        }
    }

    pub fn with_aux(mut self, aux: AuxValue) -> Self {
        self.aux = aux;
        self
    }
}
