use std::sync::Arc;

use blockdown_engine::{
    Document, DocumentError, NodeKind, ParseOptions, Pipeline, SharedBufferPool, SyntaxNode,
    TaskState, TextSpan, Token, TokenFilter, TokenKind, TreeTransformer, parse,
    parsing::snapshot,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn parse_default(md: &str) -> Document {
    let doc = parse(md, ParseOptions::default(), Vec::new(), Vec::new());
    snapshot::invariants(&doc);
    doc
}

fn labels(nodes: &[SyntaxNode]) -> Vec<String> {
    nodes.iter().map(|n| n.kind.label()).collect()
}

#[test]
fn text_leaves_match_input_substrings() {
    let md = "# Head\n\n> quote\n- [x] item\n1. one\n| a | b |\n|---|:-:|\n";
    let doc = parse_default(md);
    let leaves: Vec<_> = doc.root().text_leaves().collect();
    assert!(!leaves.is_empty());
    for leaf in &leaves {
        assert_eq!(
            doc.get_text(leaf.span).unwrap(),
            &md[leaf.span.start..leaf.span.end()]
        );
    }
}

#[test]
fn composite_nodes_strip_only_markers() {
    let md = "# Head\n\n> quote\n- [x] item\n1. one\n| a | b |\n|---|:-:|\n";
    let doc = parse_default(md);
    let is_marker = |c: char| c.is_whitespace() || "#>-*+|:[]xX.)0123456789".contains(c);

    for node in doc.walk().filter(|n| !n.children().is_empty()) {
        let mut cursor = node.span.start;
        for leaf in node.text_leaves() {
            assert!(leaf.span.start >= cursor, "leaves out of order in {}", node.kind.label());
            assert!(md[cursor..leaf.span.start].chars().all(is_marker));
            cursor = leaf.span.end();
        }
        assert!(md[cursor..node.span.end()].chars().all(is_marker));
    }
}

#[test]
fn children_nest_inside_parents() {
    let md = ":::note\n- a\n- b\n\n> q\n:::\n\n| h |\n|---|\n| c |\n";
    let doc = parse_default(md);
    for node in doc.walk() {
        for child in node.children() {
            assert!(child.span.start >= node.span.start);
            assert!(child.span.end() <= node.span.end());
        }
    }
}

#[test]
fn disposal_is_idempotent() {
    let pool = Arc::new(SharedBufferPool::new());
    let pipeline = Pipeline::builder().pool(pool.clone()).build().unwrap();

    let mut doc = pipeline.parse("text\n");
    doc.dispose();
    doc.dispose();
    drop(doc);

    assert_eq!(pool.leased_count(), 1);
    assert_eq!(pool.released_count(), 1);
    assert_eq!(pool.available_count(), 1);
}

#[test]
fn disposed_document_rejects_text_access() {
    let mut doc = parse_default("text\n");
    let span = doc.children()[0].span;
    doc.dispose();
    assert!(doc.is_disposed());
    assert_eq!(doc.get_text(span), Err(DocumentError::Disposed));
}

#[test]
fn out_of_range_span_is_rejected() {
    let doc = parse_default("abc");
    assert!(matches!(
        doc.get_text(TextSpan::new(1, 10)),
        Err(DocumentError::SpanOutOfBounds { len: 3, .. })
    ));
}

#[rstest]
#[case("```\na\n```\nafter\n", "a\n")]
#[case("```\na\n````\nafter\n", "a\n")]
#[case("```\na\n~~~\n``\n```\nafter\n", "a\n~~~\n``\n")]
#[case("~~~~\na\n~~~\n~~~~~\nafter\n", "a\n~~~\n")]
fn fences_close_on_matching_runs(#[case] md: &str, #[case] content: &str) {
    let doc = parse_default(md);
    assert_eq!(labels(doc.children())[1], "Paragraph");
    let NodeKind::CodeBlock { content: span, .. } = doc.children()[0].kind else {
        panic!("expected a code block, got {}", doc.children()[0].kind.label());
    };
    assert_eq!(doc.get_text(span).unwrap(), content);
}

#[test]
fn fence_without_closer_swallows_rest() {
    let doc = parse_default("```\na\n``\n~~~\n");
    assert_eq!(labels(doc.children()), vec!["CodeBlock(Backticks)"]);
}

#[test]
fn table_without_delimiter_falls_back_to_paragraph() {
    let doc = parse_default("a|b\nnotadelimiter\n");
    assert_eq!(labels(doc.children()), vec!["Paragraph"]);
}

#[test]
fn tables_off_without_github_extensions() {
    let options = ParseOptions {
        github_extensions: false,
        ..ParseOptions::default()
    };
    let doc = parse("a | b\n--|--\n", options, Vec::new(), Vec::new());
    assert_eq!(labels(doc.children()), vec!["Paragraph"]);
}

#[rstest]
#[case("- a\n\n- b\n", vec![2])]
#[case("- a\n\n\n- b\n", vec![1, 1])]
fn list_continuity(#[case] md: &str, #[case] item_counts: Vec<usize>) {
    let doc = parse_default(md);
    let counts: Vec<_> = doc
        .children()
        .iter()
        .map(|list| {
            assert!(matches!(list.kind, NodeKind::List { ordered: false, .. }));
            list.children().len()
        })
        .collect();
    assert_eq!(counts, item_counts);
}

#[test]
fn ordered_list_start_number() {
    let doc = parse_default("5. a\n6. b\n");
    assert_eq!(
        doc.children()[0].kind,
        NodeKind::List {
            ordered: true,
            start: Some(5)
        }
    );
}

#[test]
fn nine_digit_ordinal_is_kept() {
    let doc = parse_default("999999999. a\n");
    assert_eq!(
        doc.children()[0].kind,
        NodeKind::List {
            ordered: true,
            start: Some(999_999_999)
        }
    );
}

#[test]
fn task_states() {
    let doc = parse_default("- [x] done\n- [ ] todo\n");
    let tasks: Vec<_> = doc.children()[0]
        .children()
        .iter()
        .map(|item| match item.kind {
            NodeKind::ListItem { task } => task,
            _ => panic!("expected list item"),
        })
        .collect();
    assert_eq!(tasks, vec![TaskState::Complete, TaskState::Incomplete]);

    let texts: Vec<_> = doc
        .root()
        .text_leaves()
        .map(|n| doc.get_text(n.span).unwrap())
        .collect();
    assert_eq!(texts, vec!["done", "todo"]);
}

#[test]
fn custom_container_recursion() {
    let doc = parse_default(":::note\n# Title\n:::\n");
    assert_eq!(labels(doc.children()), vec!["CustomContainer"]);

    let container = &doc.children()[0];
    let NodeKind::CustomContainer { info, .. } = container.kind else {
        unreachable!();
    };
    assert_eq!(doc.get_text(info).unwrap(), "note");
    assert_eq!(labels(container.children()), vec!["Heading(1)"]);

    let heading = &container.children()[0];
    assert_eq!(heading.source_map.start_line, container.source_map.start_line + 1);
    assert_eq!(heading.source_map.to_string(), "2:1-2:8");
}

#[test]
fn line_column_mapping() {
    let doc = parse_default("ab\ncd\n");
    assert_eq!(doc.locate(3), (2, 1));
    assert_eq!(doc.line_index().locate(3), (2, 1));
}

#[test]
fn filters_drop_tokens_before_assembly() {
    let no_html = |_: &str, t: Token| (t.kind != TokenKind::HtmlBlock).then_some(t);
    let filters: Vec<Box<dyn TokenFilter>> = vec![Box::new(no_html)];
    let doc = parse("<div>\n</div>\n\ntext\n", ParseOptions::default(), filters, Vec::new());
    assert_eq!(labels(doc.children()), vec!["Paragraph"]);
}

#[test]
fn filters_can_rewrite_tokens() {
    // Demote every heading to plain text.
    let pipeline = Pipeline::builder()
        .token_filter(|_: &str, t: Token| {
            Some(match t.kind {
                TokenKind::Heading => Token::new(TokenKind::Text, t.span, t.line, t.column),
                _ => t,
            })
        })
        .build()
        .unwrap();
    let doc = pipeline.parse("# one\ntwo\n");
    assert_eq!(labels(doc.children()), vec!["Paragraph"]);
    assert_eq!(doc.children()[0].children().len(), 2);
}

#[test]
fn transformers_see_the_full_tree() {
    let drop_breaks = |mut root: SyntaxNode, _: &str| {
        root.children.retain(|n| n.kind != NodeKind::ThematicBreak);
        root
    };
    let transformers: Vec<Box<dyn TreeTransformer>> = vec![Box::new(drop_breaks)];
    let doc = parse("a\n\n---\n\nb\n", ParseOptions::default(), Vec::new(), transformers);
    assert_eq!(labels(doc.children()), vec!["Paragraph", "Paragraph"]);
}

#[test]
fn one_pipeline_serves_many_threads() {
    let pool = Arc::new(SharedBufferPool::new());
    let pipeline = Pipeline::builder().pool(pool.clone()).build().unwrap();

    std::thread::scope(|s| {
        for i in 0..4 {
            let pipeline = &pipeline;
            s.spawn(move || {
                let md = format!("# Doc {i}\n\n- item\n");
                let doc = pipeline.parse(&md);
                snapshot::invariants(&doc);
                assert_eq!(labels(doc.children()), vec!["Heading(1)", "List(bullet)"]);
            });
        }
    });

    assert_eq!(pool.leased_count(), 4);
    assert_eq!(pool.released_count(), 4);
}
