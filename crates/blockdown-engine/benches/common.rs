// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\nA second line.\n\n- [ ] Bullet point\n- [x] Another item\n\n1. First\n2. Second\n\n> Quoted text\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| Name | Value |\n|:-----|------:|\n| a | 1 |\n| b | 2 |\n\n";
    base.repeat(size)
}

/// Content with custom containers nested `depth` levels deep, repeated
/// `sections` times.
#[allow(dead_code)]
pub fn generate_nested_containers(sections: usize, depth: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        for level in 0..depth {
            content.push_str(&format!(":::level{level}\n"));
            content.push_str("Some paragraph content inside a container.\n\n");
        }
        for _ in 0..depth {
            content.push_str(":::\n");
        }
        content.push('\n');
    }

    content
}
