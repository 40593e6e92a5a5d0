/// ATX heading (`# Title` .. `###### Title`).
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Parses an ATX heading opener, returning `(level, content_start)`.
    ///
    /// One to six `#` after leading whitespace, followed by a space, a tab or
    /// the end of the line. `content_start` skips the markers and one space.
    pub fn parse(line: &str) -> Option<(u8, usize)> {
        let b = line.as_bytes();
        let indent = b.iter().take_while(|c| **c == b' ' || **c == b'\t').count();
        let level = b[indent..]
            .iter()
            .take_while(|c| **c == Self::MARKER)
            .count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let after = indent + level;
        match b.get(after) {
            None => Some((level as u8, after)),
            Some(b' ') | Some(b'\t') => Some((level as u8, after + 1)),
            Some(_) => None,
        }
    }
}
