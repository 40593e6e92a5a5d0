/// Which character a fence is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub const fn marker(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }

    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            b'`' => Some(FenceKind::Backticks),
            b'~' => Some(FenceKind::Tildes),
            _ => None,
        }
    }
}

/// An opening fence line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen {
    pub kind: FenceKind,
    /// Length of the fence run (at least 3).
    pub len: usize,
    /// Byte offset just past the fence run; the info string follows.
    pub info_start: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Recognises an opening fence: three or more identical backticks or
    /// tildes after leading whitespace.
    ///
    /// A backtick fence whose info string contains a backtick is not a fence.
    pub fn open(line: &str) -> Option<FenceOpen> {
        let b = line.as_bytes();
        let indent = leading_ws(b);
        let kind = FenceKind::from_marker(*b.get(indent)?)?;
        let len = run_len(&b[indent..], kind.marker());
        if len < Self::MIN_LEN {
            return None;
        }
        let info_start = indent + len;
        if kind == FenceKind::Backticks && b[info_start..].contains(&b'`') {
            return None;
        }
        Some(FenceOpen {
            kind,
            len,
            info_start,
        })
    }

    /// Returns true if `line` closes a fence of `kind` opened with `len` markers:
    /// same character, run at least as long, nothing but whitespace after.
    pub fn closes(line: &str, kind: FenceKind, len: usize) -> bool {
        let b = line.as_bytes();
        let indent = leading_ws(b);
        let run = run_len(&b[indent..], kind.marker());
        run >= len && b[indent + run..].iter().all(|c| c.is_ascii_whitespace())
    }
}

fn leading_ws(b: &[u8]) -> usize {
    b.iter().take_while(|c| **c == b' ' || **c == b'\t').count()
}

fn run_len(b: &[u8], marker: u8) -> usize {
    b.iter().take_while(|c| **c == marker).count()
}
