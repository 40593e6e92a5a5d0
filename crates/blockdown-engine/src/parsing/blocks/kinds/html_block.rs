/// Block-level tag names that open an HTML block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "pre", "script",
    "search", "section", "style", "summary", "table", "tbody", "td", "textarea", "tfoot", "th",
    "thead", "title", "tr", "track", "ul",
];

/// How an HTML block was opened, which decides what terminates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlStart {
    /// `<!--`, ends at `-->`.
    Comment,
    /// `<?`, ends at `?>`.
    ProcessingInstruction,
    /// `<!DOCTYPE ...` and friends, ends at `>`.
    Declaration,
    /// An allow-listed tag (opening or closing), ends at `</tag`.
    Tag(&'static str),
}

impl HtmlStart {
    /// Recognises an HTML block opener after leading whitespace.
    pub fn open(line: &str) -> Option<HtmlStart> {
        let t = line.trim_start().as_bytes();
        if t.first() != Some(&b'<') {
            return None;
        }
        if t.starts_with(b"<!--") {
            return Some(HtmlStart::Comment);
        }
        if t.starts_with(b"<?") {
            return Some(HtmlStart::ProcessingInstruction);
        }
        if t.len() > 2 && t[1] == b'!' && t[2].is_ascii_alphabetic() {
            return Some(HtmlStart::Declaration);
        }

        let name_start = if t.get(1) == Some(&b'/') { 2 } else { 1 };
        let name_len = t[name_start..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        if name_len == 0 {
            return None;
        }
        let name = &t[name_start..name_start + name_len];
        let tag = BLOCK_TAGS
            .iter()
            .copied()
            .find(|tag| tag.as_bytes().eq_ignore_ascii_case(name))?;

        let rest = &t[name_start + name_len..];
        let boundary = match rest.first() {
            None => true,
            Some(b' ') | Some(b'\t') | Some(b'>') => true,
            Some(b'/') => rest.get(1) == Some(&b'>'),
            Some(_) => false,
        };
        boundary.then_some(HtmlStart::Tag(tag))
    }

    /// Returns true if `line` contains this block's terminator.
    pub fn terminates(self, line: &str) -> bool {
        let b = line.as_bytes();
        match self {
            HtmlStart::Comment => contains(b, b"-->"),
            HtmlStart::ProcessingInstruction => contains(b, b"?>"),
            HtmlStart::Declaration => b.contains(&b'>'),
            HtmlStart::Tag(name) => b.windows(name.len() + 2).any(|w| {
                w[0] == b'<' && w[1] == b'/' && w[2..].eq_ignore_ascii_case(name.as_bytes())
            }),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
