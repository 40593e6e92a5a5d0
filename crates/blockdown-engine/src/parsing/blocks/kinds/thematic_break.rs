/// Thematic break (`---`, `***`, `___`, optionally spaced).
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: [u8; 3] = [b'-', b'*', b'_'];
    pub const MIN_MARKERS: usize = 3;

    /// True if the line holds only one repeated marker (at least three times),
    /// with whitespace allowed anywhere.
    pub fn matches(line: &str) -> bool {
        let mut marker = None;
        let mut count = 0usize;
        for &c in line.as_bytes() {
            match c {
                b' ' | b'\t' => {}
                c if Self::MARKERS.contains(&c) => match marker {
                    None => {
                        marker = Some(c);
                        count = 1;
                    }
                    Some(m) if m == c => count += 1,
                    Some(_) => return false,
                },
                _ => return false,
            }
        }
        count >= Self::MIN_MARKERS
    }
}
