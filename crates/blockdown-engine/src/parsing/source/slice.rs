use super::span::TextSpan;

/// Extracts the text of a span, truncating to `max` bytes with a "..." suffix.
///
/// Truncation backs off to the previous char boundary. Line terminators are
/// escaped so the preview stays on one line. Used for human-readable outlines.
pub fn preview(source: &str, sp: TextSpan, max: usize) -> String {
    let Some(text) = source.get(sp.start..sp.end()) else {
        return String::new();
    };
    let mut s = if text.len() > max {
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let mut s = text[..cut].to_string();
        s.push_str("...");
        s
    } else {
        text.to_string()
    };
    if s.contains(['\n', '\r']) {
        s = s.replace('\r', "\\r").replace('\n', "\\n");
    }
    s
}
