use crate::parsing::blocks::token::TaskState;

/// A recognised list-item marker on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub ordered: bool,
    /// The ordinal of an ordered marker; 0 for bullets.
    pub ordinal: u64,
    pub task: TaskState,
    /// Byte offset of the marker's first character.
    pub marker_start: usize,
    /// Byte offset where the item's content begins, past the marker, the
    /// whitespace after it and any task checkbox.
    pub content_start: usize,
}

pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];
    pub const MAX_DIGITS: usize = 9;

    /// Parses a bullet (`-`, `*`, `+`) or ordered (`1.`, `1)`) marker.
    ///
    /// The marker must be followed by a space or a tab.
    pub fn parse(line: &str) -> Option<ListMarker> {
        let b = line.as_bytes();
        let marker_start = ws_run(b, 0);
        let first = *b.get(marker_start)?;

        let (ordered, ordinal, marker_end) = if Self::BULLETS.contains(&first) {
            (false, 0, marker_start + 1)
        } else if first.is_ascii_digit() {
            let digits = b[marker_start..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count();
            if digits > Self::MAX_DIGITS {
                return None;
            }
            let delim = *b.get(marker_start + digits)?;
            if delim != b'.' && delim != b')' {
                return None;
            }
            let ordinal = b[marker_start..marker_start + digits]
                .iter()
                .fold(0u64, |acc, d| acc * 10 + u64::from(d - b'0'));
            (true, ordinal, marker_start + digits + 1)
        } else {
            return None;
        };

        match b.get(marker_end) {
            Some(b' ') | Some(b'\t') => {}
            _ => return None,
        }

        let mut content_start = marker_end + ws_run(b, marker_end);
        let (task, checkbox_len) = Self::task_checkbox(&b[content_start..]);
        if checkbox_len > 0 {
            content_start += checkbox_len;
            content_start += ws_run(b, content_start);
        }

        Some(ListMarker {
            ordered,
            ordinal,
            task,
            marker_start,
            content_start,
        })
    }

    /// Detects `[ ]`, `[x]` or `[X]` followed by whitespace or end of line.
    fn task_checkbox(rest: &[u8]) -> (TaskState, usize) {
        if rest.len() < 3 || rest[0] != b'[' || rest[2] != b']' {
            return (TaskState::None, 0);
        }
        if let Some(c) = rest.get(3)
            && *c != b' '
            && *c != b'\t'
        {
            return (TaskState::None, 0);
        }
        match rest[1] {
            b' ' => (TaskState::Incomplete, 3),
            b'x' | b'X' => (TaskState::Complete, 3),
            _ => (TaskState::None, 0),
        }
    }
}

fn ws_run(b: &[u8], from: usize) -> usize {
    b[from.min(b.len())..]
        .iter()
        .take_while(|c| **c == b' ' || **c == b'\t')
        .count()
}
