/// A `:::` fence line of a custom container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFence {
    /// Byte offset just past the colon run.
    pub info_start: usize,
    /// Whether text follows the colons. A bare fence closes a container.
    pub has_info: bool,
}

/// Custom container (`:::name` ... `:::`), whose interior is itself Markdown.
pub struct CustomContainer;

impl CustomContainer {
    pub const MARKER: u8 = b':';
    pub const MIN_LEN: usize = 3;

    /// Recognises a container fence line after leading whitespace.
    pub fn fence(line: &str) -> Option<ContainerFence> {
        let b = line.as_bytes();
        let indent = b.iter().take_while(|c| **c == b' ' || **c == b'\t').count();
        let run = b[indent..]
            .iter()
            .take_while(|c| **c == Self::MARKER)
            .count();
        if run < Self::MIN_LEN {
            return None;
        }
        let info_start = indent + run;
        Some(ContainerFence {
            info_start,
            has_info: !line[info_start..].trim().is_empty(),
        })
    }
}
