//! Graphviz DOT reporter

use crate::graph::NodeKind;
use crate::report::Report;
use anyhow::Result;
use std::fmt::Write;

/// Make text safe inside a double-quoted DOT string
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

fn shape(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Cause => "ellipse",
        NodeKind::State => "diamond",
        NodeKind::View | NodeKind::Other => "box",
    }
}

/// Render the report graph as a left-to-right digraph
pub fn render(report: &Report) -> Result<String> {
    let mut out = String::from("digraph CauseEffect {\n  rankdir=LR;\n");

    for node in &report.graph.nodes {
        let mut label = escape(&node.label);
        if node.update_count > 0 {
            write!(label, "\\ncount={}", node.update_count)?;
        }
        writeln!(
            out,
            "  \"{}\" [shape={},label=\"{}\"];",
            escape(&node.id),
            shape(node.node_type),
            label
        )?;
    }

    for edge in &report.graph.edges {
        let from = escape(&edge.from);
        let to = escape(&edge.to);
        match edge.label.as_deref().map(escape).filter(|l| !l.is_empty()) {
            Some(label) => writeln!(out, "  \"{}\" -> \"{}\" [label=\"{}\"];", from, to, label)?,
            None => writeln!(out, "  \"{}\" -> \"{}\";", from, to)?,
        }
    }

    out.push_str("}\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape("two\nlines\r"), "two lines ");
    }

    #[test]
    fn test_dot_structure() {
        let dot = render(&test_report()).unwrap();
        assert!(dot.starts_with("digraph CauseEffect {\n  rankdir=LR;\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("  \"tap\" [shape=ellipse,label=\"Button tap\"];\n"));
        assert!(dot.contains("  \"items\" [shape=diamond,label=\"@State \\\"items\\\"\"];\n"));
        assert!(dot.contains("  \"row\" [shape=box,label=\"ItemRow\\ncount=50\"];\n"));
        assert!(dot.contains("  \"footer\" [shape=box,label=\"FooterView\"];\n"));
    }

    #[test]
    fn test_dot_edges() {
        let dot = render(&test_report()).unwrap();
        assert!(dot.contains("  \"tap\" -> \"items\" [label=\"causes\"];\n"));
        assert!(dot.contains("  \"items\" -> \"header\";\n"));
    }
}
