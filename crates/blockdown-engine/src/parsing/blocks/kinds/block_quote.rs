/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// tokenizer or assembler code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    /// Returns true if the line, after leading whitespace, opens a quote.
    pub fn is_start(line: &str) -> bool {
        line.trim_start().as_bytes().first() == Some(&Self::PREFIX)
    }

    /// Strips blockquote prefixes from a line, returning `(depth, byte_offset)`.
    ///
    /// Each `>` may be followed by one space. Handles `> text`, `>> nested`
    /// and `> > spaced nested`.
    ///
    /// # Returns
    /// - `depth`: Number of `>` prefixes found (0 if not a blockquote)
    /// - `byte_offset`: Index into `line` where content begins after prefixes
    pub fn strip_prefixes(line: &str) -> (usize, usize) {
        let b = line.as_bytes();
        let mut i = 0usize;
        let mut depth = 0usize;

        while i < b.len() && (b[i] == b' ' || b[i] == b'\t') {
            i += 1;
        }
        while i < b.len() && b[i] == Self::PREFIX {
            depth += 1;
            i += 1;
            if i < b.len() && b[i] == b' ' {
                i += 1;
            }
        }
        (depth, i)
    }
}
