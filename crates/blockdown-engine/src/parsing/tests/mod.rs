//! Fixture tests for the parsing module.
//!
//! Each fixture is parsed with the default pipeline, checked against the tree
//! invariants and compared to a text outline snapshot. Fixtures (.md) and
//! snapshots (.snap) are co-located in `fixtures/`.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Pipeline,
    blocks::{NodeKind, SyntaxNode},
    snapshot,
    source::TextSpan,
};

// Fixture-based snapshot tests

#[rstest]
#[case("headings_and_paragraphs")]
#[case("lists_and_tasks")]
#[case("container_and_code")]
#[case("tables_and_quotes")]
fn fixture(#[case] name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let doc = Pipeline::default().parse(&md);
    snapshot::invariants(&doc);

    let outline = snapshot::outline(&doc);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, outline);
    });
}

// Assembler behaviour

fn kinds(nodes: &[SyntaxNode]) -> Vec<String> {
    nodes.iter().map(|n| n.kind.label()).collect()
}

fn parse_kinds(md: &str) -> Vec<String> {
    let doc = Pipeline::default().parse(md);
    snapshot::invariants(&doc);
    kinds(doc.children())
}

#[test]
fn empty_document() {
    let doc = Pipeline::default().parse("");
    assert!(doc.children().is_empty());
    assert_eq!(doc.root().span, TextSpan::new(0, 0));
}

#[test]
fn blank_lines_only() {
    assert!(parse_kinds("\n\n  \n").is_empty());
}

#[test]
fn form_feed_line_makes_no_paragraph() {
    assert!(parse_kinds("\x0c\n").is_empty());
    assert_eq!(parse_kinds("a\n\x0c\nb\n"), vec!["Paragraph", "Paragraph"]);
}

#[rstest]
#[case("a|b\nnotadelimiter\n", vec!["Paragraph"])]
#[case("| a | - |\n", vec!["Paragraph"])]
#[case("a | b\n--|--\n", vec!["Table([Unspecified, Unspecified])"])]
fn table_needs_delimiter_row(#[case] md: &str, #[case] expected: Vec<&str>) {
    assert_eq!(parse_kinds(md), expected);
}

#[test]
fn demoted_table_keeps_each_line_as_text() {
    let md = "a|b\nnotadelimiter\n";
    let doc = Pipeline::default().parse(md);
    let texts: Vec<_> = doc.root().text_leaves().map(|n| doc.get_text(n.span).unwrap()).collect();
    assert_eq!(texts, vec!["a|b", "notadelimiter"]);
}

#[test]
fn body_rows_are_truncated_to_header_width() {
    let doc = Pipeline::default().parse("a | b\n--|--\n1 | 2 | 3 | 4\n");
    let table = &doc.children()[0];
    let body = &table.children()[1];
    assert_eq!(body.children().len(), 2);
}

#[test]
fn short_body_rows_keep_their_cells() {
    let doc = Pipeline::default().parse("a | b | c\n--|--|--\n1 |\n");
    let body = &doc.children()[0].children()[1];
    assert_eq!(body.children().len(), 1);
}

#[rstest]
#[case("- a\n\n- b\n", vec!["List(bullet)"])]
#[case("- a\n\n\n- b\n", vec!["List(bullet)", "List(bullet)"])]
#[case("- a\n1. b\n", vec!["List(bullet)", "List(ordered, start=1)"])]
#[case("1. a\n\n2. b\n", vec!["List(ordered, start=1)"])]
fn list_grouping(#[case] md: &str, #[case] expected: Vec<&str>) {
    assert_eq!(parse_kinds(md), expected);
}

#[test]
fn list_with_one_blank_has_all_items() {
    let doc = Pipeline::default().parse("- a\n\n- b\n");
    assert_eq!(doc.children()[0].children().len(), 2);
}

#[test]
fn ordered_list_starts_at_first_ordinal() {
    let doc = Pipeline::default().parse("5. x\n6. y\n");
    assert_eq!(
        doc.children()[0].kind,
        NodeKind::List {
            ordered: true,
            start: Some(5)
        }
    );
}

#[test]
fn heading_text_excludes_markers() {
    let doc = Pipeline::default().parse("### Three  \n");
    let heading = &doc.children()[0];
    assert_eq!(heading.kind, NodeKind::Heading { level: 3 });
    let text = &heading.children()[0];
    assert_eq!(doc.get_text(text.span).unwrap(), "Three");
}

#[test]
fn empty_heading_has_no_text_child() {
    let doc = Pipeline::default().parse("#\n");
    assert!(doc.children()[0].children().is_empty());
}

#[test]
fn unclosed_fence_content_runs_to_end() {
    let md = "```\ncode\nmore";
    let doc = Pipeline::default().parse(md);
    let NodeKind::CodeBlock { content, info, .. } = doc.children()[0].kind else {
        panic!("expected code block");
    };
    assert!(info.is_empty());
    assert_eq!(doc.get_text(content).unwrap(), "code\nmore");
}

#[test]
fn fence_content_is_raw() {
    let md = "~~~\n# not a heading\n- nor a list\n~~~\n";
    assert_eq!(parse_kinds(md), vec!["CodeBlock(Tildes)"]);
}

#[test]
fn html_block_is_a_leaf() {
    let md = "<div>\n<p>hi</p>\n</div>\n\nafter\n";
    assert_eq!(parse_kinds(md), vec!["HtmlBlock", "Paragraph"]);
}

#[test]
fn nested_containers_recurse() {
    let md = ":::outer\n:::inner\n# Deep\n:::\n:::\n";
    let doc = Pipeline::default().parse(md);
    snapshot::invariants(&doc);
    let outer = &doc.children()[0];
    let inner = &outer.children()[0];
    assert!(matches!(inner.kind, NodeKind::CustomContainer { .. }));
    let heading = &inner.children()[0];
    assert_eq!(heading.kind, NodeKind::Heading { level: 1 });
    assert_eq!(heading.source_map.start_line, 3);
}

#[test]
fn container_depth_limit_stops_recursion() {
    let md = ":::a\n:::b\ntext\n:::\n:::\n";
    let doc = Pipeline::builder()
        .max_container_depth(1)
        .build()
        .unwrap()
        .parse(md);
    let outer = &doc.children()[0];
    let inner = &outer.children()[0];
    assert!(matches!(inner.kind, NodeKind::CustomContainer { .. }));
    assert!(inner.children().is_empty());
}

#[test]
fn quote_depth_is_the_deepest_line() {
    let doc = Pipeline::default().parse("> a\n>> b\n> c\n");
    assert_eq!(doc.children()[0].kind, NodeKind::BlockQuote { depth: 2 });
    assert_eq!(doc.children()[0].children().len(), 3);
}

#[test]
fn text_leaves_reproduce_source() {
    let md = "# T\n\n- [x] item\n> quote\n\n| a | b |\n|---|---|\n| c | d |\n";
    let doc = Pipeline::default().parse(md);
    snapshot::invariants(&doc);
    for leaf in doc.root().text_leaves() {
        let text = doc.get_text(leaf.span).unwrap();
        assert_eq!(text, &md[leaf.span.start..leaf.span.end()]);
        assert_eq!(text, text.trim());
    }
}
