use crate::parsing::{
    Document,
    blocks::{NodeKind, SyntaxNode},
    source::TextSpan,
};

/// Panics with a description of the first broken tree invariant.
///
/// Checked: the root covers the buffer; every span is in bounds and carries
/// the source map the line index computes for it; children nest inside their
/// parent; siblings are ordered and disjoint; sub-spans sit inside their node;
/// every `Text` leaf is non-empty and extracts through `get_text`.
pub fn check(doc: &Document) {
    let len = match doc.text() {
        Ok(source) => source.len(),
        Err(err) => panic!("cannot check invariants: {err}"),
    };
    let root = doc.root();
    assert_eq!(
        root.span,
        TextSpan::new(0, len),
        "root span must cover the whole buffer"
    );
    check_node(doc, root, len);
}

fn check_node(doc: &Document, node: &SyntaxNode, len: usize) {
    assert!(
        node.span.end() <= len,
        "{} span out of bounds: {:?} (len: {len})",
        node.kind.label(),
        node.span
    );
    assert_eq!(
        node.source_map,
        doc.source_map(node.span),
        "{} source map disagrees with line index",
        node.kind.label()
    );

    match &node.kind {
        NodeKind::CodeBlock { info, content, .. } => {
            assert_inside(node, *info, "info");
            assert_inside(node, *content, "content");
        }
        NodeKind::CustomContainer { info, body } => {
            assert_inside(node, *info, "info");
            assert_inside(node, *body, "body");
        }
        NodeKind::Text => {
            assert!(!node.span.is_empty(), "empty Text leaf at {}", node.span.start);
            assert!(node.children.is_empty(), "Text node with children");
            let text = doc.get_text(node.span);
            assert!(text.is_ok(), "Text leaf does not extract: {text:?}");
        }
        _ => {}
    }

    for child in &node.children {
        assert!(
            node.span.contains_span(child.span),
            "{} {:?} not contained in {} {:?}",
            child.kind.label(),
            child.span,
            node.kind.label(),
            node.span
        );
    }
    for pair in node.children.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.span.start < b.span.start && a.span.end() <= b.span.start,
            "siblings out of order or overlapping: {} {:?} then {} {:?}",
            a.kind.label(),
            a.span,
            b.kind.label(),
            b.span
        );
    }
    for child in &node.children {
        check_node(doc, child, len);
    }
}

fn assert_inside(node: &SyntaxNode, sub: TextSpan, what: &str) {
    assert!(
        node.span.contains_span(sub),
        "{} {what} {:?} outside node span {:?}",
        node.kind.label(),
        sub,
        node.span
    );
}
