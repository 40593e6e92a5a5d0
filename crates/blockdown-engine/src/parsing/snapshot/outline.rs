use crate::parsing::{
    Document,
    blocks::{NodeKind, SyntaxNode},
    source::{TextSpan, preview},
};

const PREVIEW_LEN: usize = 40;

/// Renders the tree as one line per node, indented two spaces per level.
///
/// Each line is `<kind> <source map>` followed by a quoted preview for text
/// and HTML nodes, or the info/content sub-spans for code blocks and custom
/// containers. No trailing newline.
pub fn outline(doc: &Document) -> String {
    let source = doc.text().unwrap_or("");
    let mut out = String::new();
    write_node(&mut out, source, doc.root(), 0);
    out.truncate(out.trim_end().len());
    out
}

fn write_node(out: &mut String, source: &str, node: &SyntaxNode, depth: usize) {
    let indent = depth * 2;
    out.push_str(&format!(
        "{:indent$}{} {}",
        "",
        node.kind.label(),
        node.source_map
    ));
    let detail = match &node.kind {
        NodeKind::Text | NodeKind::HtmlBlock => format!(" \"{}\"", quoted(source, node.span)),
        NodeKind::CodeBlock { info, content, .. } => format!(
            " info=\"{}\" content=\"{}\"",
            quoted(source, *info),
            quoted(source, *content)
        ),
        NodeKind::CustomContainer { info, .. } => format!(" info=\"{}\"", quoted(source, *info)),
        _ => String::new(),
    };
    out.push_str(&detail);
    out.push('\n');
    for child in node.children() {
        write_node(out, source, child, depth + 1);
    }
}

fn quoted(source: &str, span: TextSpan) -> String {
    preview(source, span, PREVIEW_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::Pipeline;
    use pretty_assertions::assert_eq;

    #[test]
    fn outline_indents_children() {
        let doc = Pipeline::default().parse("# Hi\n\ntext\n");
        assert_eq!(
            outline(&doc),
            "Document 1:1-4:1\n  Heading(1) 1:1-1:5\n    Text 1:3-1:5 \"Hi\"\n  Paragraph 3:1-3:5\n    Text 3:1-3:5 \"text\""
        );
    }

    #[test]
    fn outline_shows_code_sub_spans() {
        let doc = Pipeline::default().parse("```rust\nfn x() {}\n```");
        assert_eq!(
            outline(&doc),
            "Document 1:1-3:4\n  CodeBlock(Backticks) 1:1-3:4 info=\"rust\" content=\"fn x() {}\\n\""
        );
    }

    #[test]
    fn outline_shows_container_info_and_html_preview() {
        let doc = Pipeline::default().parse(":::note\n<div>\n:::\n");
        assert_eq!(
            outline(&doc),
            "Document 1:1-4:1\n  CustomContainer 1:1-3:4 info=\"note\"\n    HtmlBlock 2:1-2:6 \"<div>\""
        );
    }
}
