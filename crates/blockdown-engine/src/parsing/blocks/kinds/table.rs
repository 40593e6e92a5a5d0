use std::ops::Range;

use serde::Serialize;

/// Column alignment taken from a table's delimiter row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Alignment {
    #[default]
    Unspecified,
    Left,
    Right,
    Center,
}

/// GFM pipe table rows.
pub struct Table;

impl Table {
    pub const PIPE: u8 = b'|';

    /// True if the line contains an unescaped `|`.
    pub fn has_pipe(line: &str) -> bool {
        let b = line.as_bytes();
        (0..b.len()).any(|i| b[i] == Self::PIPE && !escaped(b, i))
    }

    /// Splits a row into cell content ranges (relative to `line`).
    ///
    /// One optional leading and one optional trailing pipe are dropped; cells
    /// are separated by unescaped pipes and trimmed of surrounding whitespace.
    pub fn split_cells(line: &str) -> Vec<Range<usize>> {
        let b = line.as_bytes();
        let mut start = b.iter().take_while(|c| is_blank(**c)).count();
        let mut end = b.len() - b[start..].iter().rev().take_while(|c| is_blank(**c)).count();
        if start >= end {
            return Vec::new();
        }
        if b[start] == Self::PIPE {
            start += 1;
        }
        if end > start && b[end - 1] == Self::PIPE && !escaped(b, end - 1) {
            end -= 1;
        }

        let mut cells = Vec::new();
        let mut cell_start = start;
        let mut i = start;
        while i < end {
            match b[i] {
                b'\\' => i += 2,
                Self::PIPE => {
                    cells.push(trim_range(b, cell_start, i));
                    cell_start = i + 1;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        cells.push(trim_range(b, cell_start, end));
        cells
    }

    /// True if every cell is `-`s with optional leading/trailing `:`.
    pub fn is_delimiter_row(line: &str) -> bool {
        if !Self::has_pipe(line) {
            return false;
        }
        let cells = Self::split_cells(line);
        !cells.is_empty() && cells.iter().all(|r| is_delimiter_cell(&line.as_bytes()[r.clone()]))
    }

    /// Alignments of a delimiter row, one per cell.
    pub fn alignments(line: &str) -> Vec<Alignment> {
        Self::split_cells(line)
            .into_iter()
            .map(|r| {
                let cell = &line.as_bytes()[r];
                let left = cell.first() == Some(&b':');
                let right = cell.len() > 1 && cell.last() == Some(&b':');
                match (left, right) {
                    (true, true) => Alignment::Center,
                    (true, false) => Alignment::Left,
                    (false, true) => Alignment::Right,
                    (false, false) => Alignment::Unspecified,
                }
            })
            .collect()
    }
}

fn is_blank(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn escaped(b: &[u8], i: usize) -> bool {
    b[..i].iter().rev().take_while(|c| **c == b'\\').count() % 2 == 1
}

fn trim_range(b: &[u8], start: usize, end: usize) -> Range<usize> {
    let lead = b[start..end].iter().take_while(|c| is_blank(**c)).count();
    let trail = b[start + lead..end]
        .iter()
        .rev()
        .take_while(|c| is_blank(**c))
        .count();
    start + lead..end - trail
}

fn is_delimiter_cell(cell: &[u8]) -> bool {
    let inner = cell.strip_prefix(b":").unwrap_or(cell);
    let inner = inner.strip_suffix(b":").unwrap_or(inner);
    !inner.is_empty() && inner.iter().all(|c| *c == b'-')
}
